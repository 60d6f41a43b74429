// src/services/animal_speeds.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const TOP_N: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Carnivore,
    Herbivore,
    Omnivore,
}

impl Diet {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "carnivore" => Some(Diet::Carnivore),
            "herbivore" => Some(Diet::Herbivore),
            "omnivore" => Some(Diet::Omnivore),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalSpeed {
    pub name: String,
    pub speed: f64,
    pub diet: Diet,
}

/// Parse `name,speed,diet` rows (first line is a header) and keep the
/// fastest `TOP_N` valid ones, fastest first.
pub fn parse_animal_speeds(csv: &str) -> Vec<AnimalSpeed> {
    let mut rows: Vec<AnimalSpeed> = csv
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_row)
        .collect();

    rows.sort_by(|a, b| b.speed.total_cmp(&a.speed));
    rows.truncate(TOP_N);
    rows
}

fn parse_row(line: &str) -> Option<AnimalSpeed> {
    let values: Vec<&str> = line.split(',').collect();
    if values.len() < 3 {
        return None;
    }

    let name = values[0].trim();
    let speed = parse_float_prefix(values[1].trim())?;
    let diet = Diet::parse(values[2].trim())?;

    if name.is_empty() || !speed.is_finite() || speed <= 0.0 {
        return None;
    }
    Some(AnimalSpeed { name: name.to_string(), speed, diet })
}

/// Read the longest leading decimal number, so `"56 km/h"` gives 56.
/// Text without leading digits (including `inf`/`NaN`) gives `None`.
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    raw[..end].parse().ok()
}

pub async fn load_animal_speeds(path: &Path) -> std::io::Result<Vec<AnimalSpeed>> {
    let csv = tokio::fs::read_to_string(path).await?;
    Ok(parse_animal_speeds(&csv))
}
