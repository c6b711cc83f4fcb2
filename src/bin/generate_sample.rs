//! Writes a synthetic data root the viewer can open:
//!
//! ```text
//! <out>/Gaussian/*.csv   <out>/Bernoulli/*.csv   <out>/Quantization/{data,prototypes,error}.csv
//! ```
//!
//! The curves are smooth saturating shapes plus noise. They only mimic the
//! look of real benchmark output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const STEPS: usize = 1000;
const RUNS: f64 = 5000.0;
const SNAPSHOTS: usize = 40;

/// File stems sort in the default label order.
const ALGORITHMS: [(&str, f64, f64); 4] = [
    // (file stem, asymptotic optimal fraction, time constant)
    ("0_epsilon_greedy", 0.82, 120.0),
    ("1_pursuit_method", 0.90, 200.0),
    ("2_reinforcement_comparison", 0.86, 90.0),
    ("3_stochastic_gradient_descent", 0.78, 260.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_rows(path: &Path, rows: &[Vec<f64>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row.iter().map(|v| format!("{v:.6}")))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// One line per step (`reward,optimal`), then the `mean,sd` footer.
fn bandit_rows(rng: &mut SimpleRng, best_reward: f64, optimal: f64, tau: f64) -> Vec<Vec<f64>> {
    let mut rows = Vec::with_capacity(STEPS + 1);
    let mut total = 0.0;
    for t in 0..STEPS {
        let progress = 1.0 - (-(t as f64) / tau).exp();
        let frac = (optimal * progress + rng.gauss(0.0, 0.01)).clamp(0.0, 1.0);
        let reward = best_reward * (0.2 + 0.8 * progress) + rng.gauss(0.0, 0.02);
        total += reward;
        rows.push(vec![reward, frac]);
    }
    let sd = (total / RUNS.sqrt()).abs() * 0.1;
    rows.push(vec![total, sd]);
    rows
}

fn write_regime(out: &Path, name: &str, best_reward: f64, rng: &mut SimpleRng) -> Result<()> {
    let dir = out.join(name);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    for (stem, optimal, tau) in ALGORITHMS {
        let rows = bandit_rows(rng, best_reward, optimal, tau);
        write_rows(&dir.join(format!("{stem}.csv")), &rows)?;
    }
    Ok(())
}

fn write_quantization(out: &Path, rng: &mut SimpleRng) -> Result<()> {
    let dir = out.join("Quantization");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let centers = [[-2.0, 0.0], [2.0, 1.0], [0.0, 3.0]];

    let points: Vec<Vec<f64>> = (0..300)
        .map(|i| {
            let c = centers[i % centers.len()];
            vec![rng.gauss(c[0], 0.6), rng.gauss(c[1], 0.6)]
        })
        .collect();
    write_rows(&dir.join("data.csv"), &points)?;

    // Prototypes start at random points and drift toward the cluster centres.
    let starts: Vec<[f64; 2]> = (0..centers.len())
        .map(|_| [rng.gauss(0.0, 2.0), rng.gauss(1.0, 2.0)])
        .collect();
    let snapshots: Vec<Vec<f64>> = (0..SNAPSHOTS)
        .map(|s| {
            let w = 1.0 - (-(s as f64) / 8.0).exp();
            starts
                .iter()
                .zip(&centers)
                .flat_map(|(p, c)| {
                    [
                        p[0] + (c[0] - p[0]) * w + rng.gauss(0.0, 0.03),
                        p[1] + (c[1] - p[1]) * w + rng.gauss(0.0, 0.03),
                    ]
                })
                .collect()
        })
        .collect();
    write_rows(&dir.join("prototypes.csv"), &snapshots)?;

    // One error per candidate count 1..=10.
    let errors: Vec<Vec<f64>> = (1..=10)
        .map(|k| vec![6.0 / k as f64 + 0.3 + rng.gauss(0.0, 0.02).abs()])
        .collect();
    write_rows(&dir.join("error.csv"), &errors)?;
    Ok(())
}

fn main() -> Result<()> {
    let out: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));

    let mut rng = SimpleRng::new(42);
    write_regime(&out, "Gaussian", 1.55, &mut rng)?;
    write_regime(&out, "Bernoulli", 0.92, &mut rng)?;
    write_quantization(&out, &mut rng)?;

    println!(
        "Wrote {} bandit runs ({STEPS} steps each) and a {SNAPSHOTS}-snapshot quantization run to {}",
        2 * ALGORITHMS.len(),
        out.display()
    );
    Ok(())
}
