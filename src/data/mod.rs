/// Data layer: loading result files and shaping them into chart series.
///
/// Architecture:
/// ```text
///  Gaussian/*.csv   Bernoulli/*.csv        Quantization/{data,prototypes,error}.csv
///        │                │                              │
///        ▼                ▼                              ▼
///   ┌──────────────────────────┐              ┌──────────────────────┐
///   │  loader                   │  parse file  │  loader               │
///   └──────────────────────────┘              └──────────────────────┘
///        │  Vec<RunMatrix>                   points, snapshots │      │ sweep
///        ▼                                               ▼      │
///   ┌──────────┐                              ┌──────────────┐  │
///   │  bandit   │ → Vec<AlgorithmSeries>       │ quantization  │  └─→ Vec<SweepPoint>
///   └──────────┘                              └──────────────┘
///                                                    │ QuantizationView
/// ```

pub mod bandit;
pub mod error;
pub mod loader;
pub mod model;
pub mod quantization;

#[cfg(test)]
pub(crate) mod fixtures;
