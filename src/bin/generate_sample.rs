use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }

    /// `None` with probability `percent`/100.
    fn sometimes_missing<'a>(&mut self, percent: u64, value: &'a str) -> Option<&'a str> {
        (self.below(100) >= percent).then_some(value)
    }
}

/// One generated row, in the column order of the usual catalogue export.
#[derive(Serialize)]
struct Row {
    show_id: String,
    #[serde(rename = "type")]
    kind: String,
    title: String,
    director: Option<String>,
    cast: Option<String>,
    country: Option<String>,
    date_added: Option<String>,
    release_year: i64,
    rating: Option<String>,
    duration: String,
    listed_in: String,
    description: String,
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const COUNTRIES: [&str; 8] = [
    "United States", "India", "United Kingdom", "Japan", "South Korea", "Canada", "France",
    "Spain",
];
const MOVIE_GENRES: [&str; 6] = [
    "Dramas, International Movies",
    "Comedies",
    "Documentaries",
    "Action & Adventure",
    "Dramas, Independent Movies",
    "Children & Family Movies",
];
const SHOW_GENRES: [&str; 4] = [
    "International TV Shows, TV Dramas",
    "Kids' TV",
    "Docuseries",
    "Crime TV Shows, TV Dramas",
];
const MOVIE_RATINGS: [&str; 5] = ["TV-MA", "TV-14", "R", "PG-13", "PG"];
const SHOW_RATINGS: [&str; 4] = ["TV-MA", "TV-14", "TV-PG", "TV-Y7"];
const DIRECTORS: [&str; 5] = [
    "Ava Moreno", "Kenji Sato", "Priya Nair", "Tom Becker", "Lucía Ortega",
];
const ACTORS: [&str; 6] = [
    "Sam Hale", "Mina Park", "Ravi Das", "Elena Ruiz", "Owen Clarke", "Yuki Mori",
];

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let is_movie = rng.below(100) < 70;
            let release_year = 1990 + rng.below(34) as i64;
            let added_year = (release_year + rng.below(5) as i64).min(2023);
            let date_added = format!(
                "{} {}, {added_year}",
                rng.pick(&MONTHS),
                1 + rng.below(28)
            );
            // Some exports carry stray whitespace; a few dates are garbage.
            let date_added = match rng.below(20) {
                0 => format!(" {date_added}"),
                1 => "unknown".to_string(),
                _ => date_added,
            };
            let country = rng.pick(&COUNTRIES);
            let country = if rng.below(10) == 0 { format!("{country} ") } else { country.to_string() };

            let (kind, genres, ratings, duration) = if is_movie {
                let minutes = 75 + rng.below(90);
                ("Movie", &MOVIE_GENRES[..], &MOVIE_RATINGS[..], format!("{minutes} min"))
            } else {
                let seasons = 1 + rng.below(6);
                let unit = if seasons == 1 { "Season" } else { "Seasons" };
                ("TV Show", &SHOW_GENRES[..], &SHOW_RATINGS[..], format!("{seasons} {unit}"))
            };
            let cast = format!("{}, {}", rng.pick(&ACTORS), rng.pick(&ACTORS));

            Row {
                show_id: format!("s{}", i + 1),
                kind: kind.to_string(),
                title: format!("Sample {kind} {}", i + 1),
                director: rng
                    .sometimes_missing(30, DIRECTORS[i % DIRECTORS.len()])
                    .map(str::to_string),
                cast: rng.sometimes_missing(10, &cast).map(str::to_string),
                country: rng.sometimes_missing(10, &country).map(str::to_string),
                date_added: Some(date_added),
                release_year,
                rating: rng
                    .sometimes_missing(2, ratings[i % ratings.len()])
                    .map(str::to_string),
                duration,
                listed_in: genres[i % genres.len()].to_string(),
                description: format!("Generated title number {}.", i + 1),
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    fn text(rows: &[Row], f: impl Fn(&Row) -> Option<&str>) -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("show_id", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("director", DataType::Utf8, true),
        Field::new("cast", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, true),
        Field::new("duration", DataType::Utf8, false),
        Field::new("listed_in", DataType::Utf8, false),
        Field::new("description", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        text(rows, |r| Some(r.show_id.as_str())),
        text(rows, |r| Some(r.kind.as_str())),
        text(rows, |r| Some(r.title.as_str())),
        text(rows, |r| r.director.as_deref()),
        text(rows, |r| r.cast.as_deref()),
        text(rows, |r| r.country.as_deref()),
        text(rows, |r| r.date_added.as_deref()),
        Arc::new(Int64Array::from(
            rows.iter().map(|r| r.release_year).collect::<Vec<_>>(),
        )),
        text(rows, |r| r.rating.as_deref()),
        text(rows, |r| Some(r.duration.as_str())),
        text(rows, |r| Some(r.listed_in.as_str())),
        text(rows, |r| Some(r.description.as_str())),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(400, &mut rng);

    write_csv(&rows, "sample_titles.csv")?;
    write_parquet(&rows, "sample_titles.parquet")?;

    println!(
        "Wrote {} titles to sample_titles.csv and sample_titles.parquet",
        rows.len()
    );
    Ok(())
}
