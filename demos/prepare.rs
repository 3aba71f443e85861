//! Preparation Example
//!
//! Demonstrates cleaning, encoding, scaling, and splitting a small
//! passenger frame.

use polars::prelude::*;
use titanic_prep::preprocessing::PrepPipeline;

fn main() -> anyhow::Result<()> {
    // Small sample with missing ages and embarkation
    let df = df!(
        "PassengerId" => &[1i64, 2, 3, 4, 5, 6, 7, 8],
        "Name" => &["Braund", "Cumings", "Heikkinen", "Futrelle", "Allen", "Moran", "McCarthy", "Palsson"],
        "Ticket" => &["A/5 21171", "PC 17599", "STON/O2", "113803", "373450", "330877", "17463", "349909"],
        "Cabin" => &["", "C85", "", "C123", "", "", "E46", ""],
        "Pclass" => &[3i64, 1, 3, 1, 3, 3, 2, 3],
        "Sex" => &["male", "female", "female", "female", "male", "male", "male", "male"],
        "Age" => &[Some(22.0), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None, Some(54.0), Some(2.0)],
        "SibSp" => &[1i64, 1, 0, 1, 0, 0, 0, 3],
        "Parch" => &[0i64, 0, 0, 0, 0, 0, 0, 1],
        "Fare" => &[7.25, 71.28, 7.92, 53.10, 8.05, 8.46, 51.86, 21.07],
        "Embarked" => &[Some("S"), Some("C"), Some("S"), Some("S"), Some("S"), Some("Q"), None, Some("S")],
        "Survived" => &[0i64, 1, 1, 1, 0, 0, 0, 0],
    )?;

    println!("Original data:");
    println!("{}", df);

    let pipeline = PrepPipeline::new(df);

    println!("\nColumn summary:");
    for stats in pipeline.summarize()? {
        println!(
            "  {:<12} nulls: {} median: {:?}",
            stats.name, stats.null_count, stats.median
        );
    }

    let (train, test) = pipeline.prepare_and_split()?;

    println!("\nTrain set ({} rows):", train.height());
    println!("{}", train);
    println!("\nTest set ({} rows):", test.height());
    println!("{}", test);

    Ok(())
}
