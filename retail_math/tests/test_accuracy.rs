use retail_math::accuracy::{
    mean_absolute_error, mean_squared_error, root_mean_squared_error, Accuracy,
};
use retail_math::MathError;
use rstest::rstest;

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let mae = mean_absolute_error(&actual, &predicted).unwrap();
    assert!((mae - 2.4).abs() < 1e-9);

    let mse = mean_squared_error(&actual, &predicted).unwrap();
    assert!((mse - 6.0).abs() < 1e-9);

    let rmse = root_mean_squared_error(&actual, &predicted).unwrap();
    assert!((rmse - 6.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_perfect_prediction_has_zero_rmse() {
    let values = vec![3.0, 1.0, 4.0, 1.0, 5.0];
    assert_eq!(root_mean_squared_error(&values, &values).unwrap(), 0.0);
}

#[test]
fn test_accuracy_bundle_matches_functions() {
    let actual = vec![1.0, 2.0, 3.0];
    let predicted = vec![2.0, 2.0, 5.0];
    let accuracy = Accuracy::evaluate(&actual, &predicted).unwrap();

    assert!((accuracy.mae - 1.0).abs() < 1e-12);
    assert!((accuracy.mse - 5.0 / 3.0).abs() < 1e-12);
    assert!((accuracy.rmse - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    assert!(accuracy.to_string().contains("RMSE"));
}

#[rstest]
#[case(vec![], vec![])]
#[case(vec![1.0, 2.0, 3.0], vec![1.0, 2.0])]
fn test_invalid_pairs_are_rejected(#[case] actual: Vec<f64>, #[case] predicted: Vec<f64>) {
    let result = root_mean_squared_error(&actual, &predicted);
    assert!(matches!(
        result,
        Err(MathError::InvalidInput(_)) | Err(MathError::InsufficientData(_))
    ));
}
