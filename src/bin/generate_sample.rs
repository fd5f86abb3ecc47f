use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// (category, first flight, max payload kg, success probability)
const BOOSTERS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 1, 700.0, 0.2),
    ("v1.1", 6, 4_500.0, 0.3),
    ("FT", 21, 9_600.0, 0.75),
    ("B4", 40, 7_000.0, 0.6),
    ("B5", 50, 15_600.0, 0.9),
];

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic synthetic launch table as CSV and Parquet")]
struct Args {
    /// Output path without extension; `.csv` and `.parquet` are appended
    #[arg(default_value = "spacex_launch_dash")]
    out_stem: String,

    /// Number of launches to generate
    #[arg(short, long, default_value_t = 56)]
    count: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

struct Launch {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload_mass_kg: f64,
    booster_version: String,
    booster_category: &'static str,
}

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Launch> {
    (1..=n)
        .map(|flight| {
            // Newest booster generation already flying at this flight number.
            let (category, _, max_payload, p_success) = BOOSTERS
                .iter()
                .rev()
                .find(|(_, first, _, _)| flight >= *first)
                .copied()
                .unwrap_or(BOOSTERS[0]);

            // Early flights only used the first pad.
            let site = if flight < 5 { SITES[0] } else { *rng.pick(&SITES) };
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < p_success);

            Launch {
                flight_number: flight as i64,
                site,
                class,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight),
                booster_category: category,
            }
        })
        .collect()
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight_number.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_mass_kg),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let launches = generate(args.count, &mut rng);

    let csv_path = format!("{}.csv", args.out_stem);
    let parquet_path = format!("{}.parquet", args.out_stem);
    write_csv(Path::new(&csv_path), &launches)?;
    write_parquet(Path::new(&parquet_path), &launches)?;

    log::info!("Wrote {} launches to {csv_path} and {parquet_path}", launches.len());
    println!("Wrote {} launches to {csv_path} and {parquet_path}", launches.len());
    Ok(())
}
