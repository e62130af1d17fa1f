//! Generate a deterministic synthetic survey so the converter can be tried
//! end to end:
//!
//! ```text
//! cargo run --bin generate_sample
//! cargo run -- --csv sample_data.csv --out sample_bundle.npz \
//!     --x-cols log_res,chargeability --s-cols east,north \
//!     --anchors sample_anchors.txt --y-anchor-col lith_id \
//!     --constraints sample_constraints.csv
//! ```

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

/// (name, mean log-resistivity, mean chargeability)
const LITHOLOGIES: [(&str, f64, f64); 3] = [
    ("overburden", 1.8, 4.0),
    ("host_rock", 2.6, 8.0),
    ("sulphide_zone", 1.2, 28.0),
];

fn main() {
    let mut rng = SimpleRng::new(42);

    // 20 x 10 station grid, 25 m spacing.
    let (cols, rows_per_col) = (20usize, 10usize);
    let n = cols * rows_per_col;

    let mut writer = csv::Writer::from_path("sample_data.csv").expect("Failed to create CSV");
    writer
        .write_record(["east", "north", "log_res", "chargeability", "lith_id"])
        .expect("Failed to write header");

    let mut lith_of_station = Vec::with_capacity(n);
    for col in 0..cols {
        for row in 0..rows_per_col {
            let east = 500_000.0 + col as f64 * 25.0;
            let north = 7_450_000.0 + row as f64 * 25.0;

            // A dipping conductive zone crosses the middle of the grid.
            let lith_id = if (7..13).contains(&col) && row >= col % 5 && row < col % 5 + 4 {
                2
            } else if row < 2 {
                0
            } else {
                1
            };
            let (_, mean_res, mean_chg) = LITHOLOGIES[lith_id];

            let log_res = rng.gauss(mean_res, 0.15);
            let chargeability = rng.gauss(mean_chg, 1.5).max(0.0);

            writer
                .write_record([
                    format!("{east:.1}"),
                    format!("{north:.1}"),
                    format!("{log_res:.4}"),
                    format!("{chargeability:.3}"),
                    lith_id.to_string(),
                ])
                .expect("Failed to write row");
            lith_of_station.push(lith_id);
        }
    }
    writer.flush().expect("Failed to flush CSV");

    // Anchors: one labelled station per lithology, first occurrence.
    let anchors: Vec<usize> = LITHOLOGIES
        .iter()
        .enumerate()
        .filter_map(|(id, _)| lith_of_station.iter().position(|&l| l == id))
        .collect();
    let anchor_lines: Vec<String> = anchors.iter().map(|a| a.to_string()).collect();
    std::fs::write("sample_anchors.txt", anchor_lines.join("\n") + "\n")
        .expect("Failed to write anchors");

    // Constraints: a few must-link pairs within a lithology and cannot-link
    // pairs across lithologies.
    let mut constraints = csv::Writer::from_path("sample_constraints.csv")
        .expect("Failed to create constraints CSV");
    constraints
        .write_record(["i", "j", "type", "rho"])
        .expect("Failed to write header");
    let mut written = 0usize;
    'outer: for i in 0..n {
        for j in (i + 1)..n {
            if rng.next_f64() > 0.0008 {
                continue;
            }
            let must_link = lith_of_station[i] == lith_of_station[j];
            let rho = 0.6 + 0.4 * rng.next_f64();
            constraints
                .write_record([
                    i.to_string(),
                    j.to_string(),
                    u8::from(must_link).to_string(),
                    format!("{rho:.3}"),
                ])
                .expect("Failed to write constraint");
            written += 1;
            if written >= 30 {
                break 'outer;
            }
        }
    }
    constraints.flush().expect("Failed to flush constraints");

    println!(
        "Wrote sample_data.csv ({n} stations), sample_anchors.txt ({} anchors), \
         sample_constraints.csv ({written} constraints)",
        anchors.len()
    );
}
