//! Integration test: preparation pipeline end-to-end

use polars::prelude::*;
use titanic_prep::preprocessing::{PrepConfig, PrepPipeline, Stage};
use titanic_prep::PrepError;

fn sample_passengers() -> DataFrame {
    df!(
        "PassengerId" => &[1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        "Name" => &[
            "Braund", "Cumings", "Heikkinen", "Futrelle", "Allen", "Moran",
            "McCarthy", "Palsson", "Johnson", "Nasser", "Sandstrom", "Saundercock",
        ],
        "Ticket" => &[
            "A/5 21171", "PC 17599", "STON/O2", "113803", "373450", "330877",
            "17463", "349909", "347742", "237736", "PP 9549", "A/5 2151",
        ],
        "Cabin" => &[
            "", "C85", "", "C123", "", "", "E46", "", "", "", "G6", "",
        ],
        "Pclass" => &[3i64, 1, 3, 1, 3, 3, 2, 3, 2, 1, 3, 2],
        "Sex" => &[
            "male", "female", "female", "female", "male", "male",
            "male", "male", "female", "female", "female", "male",
        ],
        "Age" => &[
            Some(22.0), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None,
            Some(54.0), Some(2.0), Some(27.0), Some(14.0), None, None,
        ],
        "SibSp" => &[1i64, 1, 0, 1, 0, 0, 0, 3, 0, 1, 1, 0],
        "Parch" => &[0i64, 0, 0, 0, 0, 0, 0, 1, 2, 0, 1, 0],
        "Fare" => &[7.25, 71.28, 7.92, 53.10, 8.05, 8.46, 51.86, 21.07, 11.13, 30.07, 16.70, 13.00],
        "Embarked" => &[
            Some("S"), Some("C"), Some("S"), Some("S"), Some("S"), Some("Q"),
            Some("S"), Some("S"), Some("S"), Some("C"), None, Some("S"),
        ],
        "Survived" => &[0i64, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 0],
    )
    .unwrap()
}

#[test]
fn test_prepare_and_split_partition() {
    let (train, test) = PrepPipeline::new(sample_passengers())
        .prepare_and_split()
        .unwrap();

    // ceil(12 * 0.2) = 3
    assert_eq!(test.height(), 3);
    assert_eq!(train.height(), 9);
    assert_eq!(train.height() + test.height(), 12);
    assert_eq!(train.width(), test.width());
}

#[test]
fn test_imputation_removes_all_nulls() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();

    let data = pipeline.data();
    assert_eq!(data.column("Age").unwrap().null_count(), 0);
    assert_eq!(data.column("Embarked").unwrap().null_count(), 0);
    assert_eq!(data.height(), 12);
}

#[test]
fn test_age_filled_with_group_median() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();

    let ages = pipeline.data().column("Age").unwrap().f64().unwrap();
    // Row 5: class-3 male, missing age. Observed class-3 male ages are
    // [22, 35, 2], median 22.
    assert_eq!(ages.get(5), Some(22.0));
    // Row 10: class-3 female; observed class-3 female ages are [26].
    assert_eq!(ages.get(10), Some(26.0));
    // Row 11: class-2 male; observed class-2 male ages are [54].
    assert_eq!(ages.get(11), Some(54.0));
    // Observed values untouched
    assert_eq!(ages.get(0), Some(22.0));
    assert_eq!(ages.get(1), Some(38.0));
}

#[test]
fn test_encoding_results() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    pipeline.encode_categoricals().unwrap();

    let data = pipeline.data();
    // Sex contains only 0 and 1
    let sex = data.column("Sex").unwrap().i64().unwrap();
    assert!(sex.into_iter().all(|v| matches!(v, Some(0) | Some(1))));

    // Embarked replaced by indicator columns in sorted category order
    assert!(data.column("Embarked").is_err());
    assert!(data.column("Embarked_C").is_ok());
    assert!(data.column("Embarked_Q").is_ok());
    assert!(data.column("Embarked_S").is_ok());
    assert_eq!(data.height(), 12);
}

#[test]
fn test_missing_embarkation_treated_as_fill_value() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    pipeline.encode_categoricals().unwrap();

    // Row 10 had a missing embarkation, filled with "S"
    let data = pipeline.data();
    let s = data.column("Embarked_S").unwrap().i32().unwrap();
    let c = data.column("Embarked_C").unwrap().i32().unwrap();
    let q = data.column("Embarked_Q").unwrap().i32().unwrap();
    assert_eq!(s.get(10), Some(1));
    assert_eq!(c.get(10), Some(0));
    assert_eq!(q.get(10), Some(0));
}

#[test]
fn test_family_size_values() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    pipeline.encode_categoricals().unwrap();
    pipeline.engineer_family_size().unwrap();

    let data = pipeline.data();
    let family = data.column("FamilySize").unwrap().i64().unwrap();
    let sibsp = data.column("SibSp").unwrap().i64().unwrap();
    let parch = data.column("Parch").unwrap().i64().unwrap();

    for i in 0..data.height() {
        let expected = sibsp.get(i).unwrap() + parch.get(i).unwrap() + 1;
        assert_eq!(family.get(i), Some(expected));
    }
}

#[test]
fn test_irrelevant_columns_dropped() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    pipeline.encode_categoricals().unwrap();
    pipeline.engineer_family_size().unwrap();
    pipeline.drop_irrelevant_columns().unwrap();

    let data = pipeline.data();
    for col in ["PassengerId", "Name", "Ticket", "Cabin"] {
        assert!(data.column(col).is_err(), "{col} should be dropped");
    }
    assert_eq!(data.height(), 12);
}

#[test]
fn test_scaling_bounds_and_target_untouched() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    pipeline.encode_categoricals().unwrap();
    pipeline.engineer_family_size().unwrap();
    pipeline.drop_irrelevant_columns().unwrap();
    pipeline.scale_numeric_features().unwrap();
    assert_eq!(pipeline.stage(), Stage::Scaled);

    let data = pipeline.data();
    for column in data.get_columns() {
        if column.name().as_str() == "Survived" {
            assert_eq!(column.dtype(), &DataType::Int64);
            continue;
        }
        let ca = column.as_materialized_series().f64().unwrap();
        let min = ca.min().unwrap();
        let max = ca.max().unwrap();
        assert!(min >= 0.0, "{} min {min}", column.name());
        assert!(max <= 1.0, "{} max {max}", column.name());
    }
}

#[test]
fn test_row_count_invariant_across_steps() {
    let mut pipeline = PrepPipeline::new(sample_passengers());
    pipeline.impute_missing_values().unwrap();
    assert_eq!(pipeline.data().height(), 12);
    pipeline.encode_categoricals().unwrap();
    assert_eq!(pipeline.data().height(), 12);
    pipeline.engineer_family_size().unwrap();
    assert_eq!(pipeline.data().height(), 12);
    pipeline.drop_irrelevant_columns().unwrap();
    assert_eq!(pipeline.data().height(), 12);
    pipeline.scale_numeric_features().unwrap();
    assert_eq!(pipeline.data().height(), 12);
}

#[test]
fn test_determinism_across_runs() {
    let (train_a, test_a) = PrepPipeline::new(sample_passengers())
        .prepare_and_split()
        .unwrap();
    let (train_b, test_b) = PrepPipeline::new(sample_passengers())
        .prepare_and_split()
        .unwrap();

    assert!(train_a.equals(&train_b));
    assert!(test_a.equals(&test_b));
}

#[test]
fn test_custom_config() {
    let config = PrepConfig::new()
        .with_test_fraction(0.5)
        .with_random_seed(7);
    let (train, test) = PrepPipeline::with_config(sample_passengers(), config)
        .prepare_and_split()
        .unwrap();

    assert_eq!(test.height(), 6);
    assert_eq!(train.height(), 6);
}

#[test]
fn test_unknown_sex_value_aborts() {
    // Row 0 keeps an observed age, so imputation succeeds and the unknown
    // value is first seen by the encoder.
    let mut df = sample_passengers();
    df.with_column(Series::new(
        "Sex".into(),
        &[
            "dragon", "female", "female", "female", "male", "male",
            "male", "male", "female", "female", "female", "male",
        ],
    ))
    .unwrap();

    let err = PrepPipeline::new(df).prepare_and_split().unwrap_err();
    assert!(matches!(err, PrepError::UnknownCategory { .. }));
}

#[test]
fn test_summarize_reports_nulls() {
    let pipeline = PrepPipeline::new(sample_passengers());
    let stats = pipeline.summarize().unwrap();

    let age = stats.iter().find(|s| s.name == "Age").unwrap();
    assert_eq!(age.null_count, 3);
    let embarked = stats.iter().find(|s| s.name == "Embarked").unwrap();
    assert_eq!(embarked.null_count, 1);
    assert_eq!(
        embarked.categories.as_deref(),
        Some(&["C".to_string(), "Q".to_string(), "S".to_string()][..])
    );
}
