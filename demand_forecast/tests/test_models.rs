use demand_forecast::models::gradient_boosting::GradientBoostingRegressor;
use demand_forecast::{ForecastConfig, ForecastModel, TrainedForecastModel};

fn create_test_data() -> (Vec<Vec<f64>>, Vec<f64>) {
    // Demand rises with the discount and doubles under promotion.
    let mut features = Vec::new();
    let mut targets = Vec::new();
    for i in 0..40 {
        let discount = (i % 5) as f64 * 0.5;
        let promotion = (i % 2) as f64;
        features.push(vec![(i % 7) as f64, 0.0, promotion, (i % 3) as f64, discount]);
        targets.push((10.0 + 8.0 * discount) * (1.0 + promotion));
    }
    (features, targets)
}

#[test]
fn test_gradient_boosting_learns_structure() {
    let (features, targets) = create_test_data();
    let model = GradientBoostingRegressor::from_config(&ForecastConfig::default()).unwrap();
    let trained = model.train(&features, &targets).unwrap();

    let predicted = trained.predict(&features);
    let rmse = retail_math::root_mean_squared_error(&targets, &predicted).unwrap();
    assert!(rmse < 2.0, "training rmse too high: {}", rmse);

    let promoted = trained.predict_row(&[0.0, 0.0, 1.0, 0.0, 2.0]);
    let regular = trained.predict_row(&[0.0, 0.0, 0.0, 0.0, 2.0]);
    assert!(promoted > regular);
}

#[test]
fn test_constant_target_predicts_constant() {
    let (features, _) = create_test_data();
    let targets = vec![42.0; features.len()];
    let trained = GradientBoostingRegressor::new(20, 0.1)
        .unwrap()
        .train(&features, &targets)
        .unwrap();

    for prediction in trained.predict(&features) {
        assert!((prediction - 42.0).abs() < 1e-4);
    }
    assert!(trained.train_mse() < 1e-6);
}

#[test]
fn test_more_stages_fit_training_data_better() {
    let (features, targets) = create_test_data();
    let short = GradientBoostingRegressor::new(5, 0.1)
        .unwrap()
        .train(&features, &targets)
        .unwrap();
    let long = GradientBoostingRegressor::new(100, 0.1)
        .unwrap()
        .train(&features, &targets)
        .unwrap();

    assert!(long.train_mse() < short.train_mse());
}

#[test]
fn test_training_is_deterministic_without_subsampling() {
    let (features, targets) = create_test_data();
    let model = GradientBoostingRegressor::from_config(&ForecastConfig::default()).unwrap();
    let a = model.train(&features, &targets).unwrap().predict(&features);
    let b = model.train(&features, &targets).unwrap().predict(&features);
    assert_eq!(a, b);
}

#[test]
fn test_subsampled_training_still_fits() {
    let (features, targets) = create_test_data();
    let model = GradientBoostingRegressor::new(100, 0.1)
        .unwrap()
        .with_subsample(0.5)
        .unwrap();
    let trained = model.train(&features, &targets).unwrap();
    let predicted = trained.predict(&features);
    assert_eq!(predicted.len(), targets.len());
    assert!(predicted.iter().all(|p| p.is_finite()));
}

#[test]
fn test_model_names() {
    let model = GradientBoostingRegressor::new(100, 0.1).unwrap();
    assert!(model.name().contains("n_estimators=100"));
    let (features, targets) = create_test_data();
    let trained = model.train(&features, &targets).unwrap();
    assert_eq!(trained.name(), model.name());
    assert_eq!(trained.n_features(), 5);
}
