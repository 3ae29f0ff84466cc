//! Serving-time classification: fallback rules, defaults and the model seam.

use floodrisk_core::{
    defaults::{ClassificationRequest, WardDefaultsTable},
    error::{FloodError, FloodResult},
    fallback::FallbackClassifier,
    features::FeatureVector,
    record::FloodRecord,
    scorer::RiskLevel,
    serving::{ModelOutput, RiskModel, ServingContext},
    ward::WardRegistry,
};

fn request(rain_24h: f64, river_level: f64, blockage: f64) -> ClassificationRequest {
    ClassificationRequest {
        rain_24h_mm:         Some(rain_24h),
        river_level_m:       Some(river_level),
        drain_blockage_risk: Some(blockage),
        ..ClassificationRequest::default()
    }
}

#[test]
fn heavy_rain_is_danger() {
    let c = FallbackClassifier::new().classify(&request(95.0, 204.5, 0.5), &WardDefaultsTable::empty());
    assert_eq!(c.flood_risk_level, RiskLevel::Danger);
    assert_eq!(c.risk_label, "Danger");
    assert_eq!(c.confidence, 0.85);
    assert!(c.max_flood_depth_cm >= 40.0 && c.max_flood_depth_cm <= 100.0);
}

#[test]
fn light_rain_is_safe() {
    let c = FallbackClassifier::new().classify(&request(30.0, 203.2, 0.4), &WardDefaultsTable::empty());
    assert_eq!(c.flood_risk_level, RiskLevel::Safe);
    assert_eq!(c.risk_label, "Safe");
    assert_eq!(c.confidence, 0.70);
    assert!(c.max_flood_depth_cm <= 10.0);
}

#[test]
fn moderate_rain_is_warning() {
    let c = FallbackClassifier::new().classify(&request(65.0, 203.5, 0.5), &WardDefaultsTable::empty());
    assert_eq!(c.flood_risk_level, RiskLevel::Warning);
    assert_eq!(c.confidence, 0.75);
    assert!((10.0..=40.0).contains(&c.max_flood_depth_cm));
}

#[test]
fn extreme_inputs_are_capped() {
    let c = FallbackClassifier::new().classify(&request(900.0, 210.0, 1.0), &WardDefaultsTable::empty());
    assert_eq!(c.flood_risk_level, RiskLevel::Danger);
    assert_eq!(c.max_flood_depth_cm, 100.0);
}

#[test]
fn negative_inputs_are_not_rejected() {
    let c = FallbackClassifier::new().classify(&request(-20.0, 203.0, 0.1), &WardDefaultsTable::empty());
    assert_eq!(c.flood_risk_level, RiskLevel::Safe);
    assert!(c.max_flood_depth_cm >= 0.0);
}

#[test]
fn response_has_the_wire_shape() {
    let c = FallbackClassifier::new().classify(&request(95.0, 204.5, 0.5), &WardDefaultsTable::empty());
    let json = serde_json::to_value(&c).unwrap();
    let object = json.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "citizen_reports_count",
            "confidence",
            "drain_capacity_score",
            "flood_risk_level",
            "max_flood_depth_cm",
            "risk_label",
        ]
    );
    assert_eq!(json["flood_risk_level"], 2);
    assert_eq!(json["risk_label"], "Danger");
    assert_eq!(json["drain_capacity_score"], 0.7);
}

#[test]
fn ward_defaults_fill_missing_fields() {
    let context = ServingContext::from_registry(WardRegistry::delhi());
    let mut req = request(30.0, 203.2, 0.4);
    req.ward_name = Some("Karol Bagh".into());
    let resolved = req.resolve(context.defaults());
    assert_eq!(resolved.features.distance_to_river_m, 3500.0);

    // Unknown wards never fail.
    req.ward_name = Some("Nowhere".into());
    let c = context.classify(&req);
    assert_eq!(c.flood_risk_level, RiskLevel::Safe);
}

#[test]
fn dataset_defaults_take_the_first_record_per_ward() {
    let mut first = sample_record(1000, "Paharganj");
    first.drain_blockage_risk = 0.8;
    first.citizen_reports_count = 7;
    let mut second = sample_record(1001, "Paharganj");
    second.drain_blockage_risk = 0.2;

    let table = WardDefaultsTable::from_records(&[first, second]);
    assert_eq!(table.len(), 1);

    let resolved = ClassificationRequest::for_ward("Paharganj").resolve(&table);
    assert_eq!(resolved.features.drain_blockage_risk, 0.8);
    assert_eq!(resolved.citizen_reports_count, 7);

    let context = ServingContext::new(WardRegistry::delhi(), table);
    let c = context.classify(&ClassificationRequest {
        rain_24h_mm: Some(20.0),
        ..ClassificationRequest::for_ward("Paharganj")
    });
    // Blockage 0.8 from the ward's first record trips the danger tier.
    assert_eq!(c.flood_risk_level, RiskLevel::Danger);
    assert_eq!(c.citizen_reports_count, 7);
}

struct FixedModel(ModelOutput);

impl RiskModel for FixedModel {
    fn predict(&self, _features: &FeatureVector) -> FloodResult<ModelOutput> {
        Ok(self.0)
    }
}

struct BrokenModel;

impl RiskModel for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict(&self, _features: &FeatureVector) -> FloodResult<ModelOutput> {
        Err(FloodError::Model { reason: "feature count mismatch".into() })
    }
}

#[test]
fn trained_model_takes_precedence() {
    let model = FixedModel(ModelOutput {
        level:         RiskLevel::Warning,
        probabilities: [0.1, 0.7, 0.2],
    });
    let context = ServingContext::from_registry(WardRegistry::delhi()).with_model(Box::new(model));
    assert!(context.has_model());

    let c = context.classify(&request(95.0, 204.5, 0.5));
    assert_eq!(c.flood_risk_level, RiskLevel::Warning);
    assert_eq!(c.confidence, 0.7);
    assert!((10.0..=40.0).contains(&c.max_flood_depth_cm));
}

#[test]
fn model_errors_fall_back_to_rules() {
    let context = ServingContext::from_registry(WardRegistry::delhi()).with_model(Box::new(BrokenModel));
    let c = context.classify(&request(95.0, 204.5, 0.5));
    assert_eq!(c.flood_risk_level, RiskLevel::Danger);
    assert_eq!(c.confidence, 0.85);
}

#[test]
fn context_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServingContext>();

    let context = ServingContext::from_registry(WardRegistry::delhi());
    std::thread::scope(|s| {
        for rain in [10.0, 60.0, 95.0] {
            let context = &context;
            s.spawn(move || {
                let c = context.classify(&request(rain, 203.5, 0.5));
                assert_eq!(c.flood_risk_level as u8, if rain > 80.0 { 2 } else if rain > 50.0 { 1 } else { 0 });
            });
        }
    });
}

fn sample_record(cell_id: u64, ward_name: &str) -> FloodRecord {
    FloodRecord {
        cell_id,
        latitude:              28.6448,
        longitude:             77.2167,
        ward_name:             ward_name.to_string(),
        zone:                  floodrisk_core::ward::Zone::Central,
        distance_to_river_m:   3000.0,
        rain_1h_mm:            5.0,
        rain_3h_mm:            12.0,
        rain_24h_mm:           30.0,
        rain_forecast_3h_mm:   13.5,
        elevation_m:           216.0,
        slope_percent:         2.1,
        impervious_ratio:      0.8,
        drain_density:         0.5,
        drain_capacity_score:  0.7,
        drain_blockage_risk:   0.5,
        river_level_m:         203.4,
        flooded_before:        0,
        flood_frequency:       1,
        citizen_reports_count: 0,
        avg_reported_depth_cm: 0.0,
        max_flood_depth_cm:    0.0,
        flood_risk_level:      RiskLevel::Safe,
    }
}
