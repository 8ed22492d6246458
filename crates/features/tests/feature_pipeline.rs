//! Feature Pipeline Integration Test
//!
//! Exercises the full assembly path:
//! 1. Raw bars become a TimeSeriesFrame
//! 2. Computers produce aligned blocks
//! 3. The concatenated matrix is lagged once
//! 4. The label is attached unshifted
//! 5. A trainer-ready set is split off

use approx::assert_relative_eq;
use causal_features::{
    Bar, CausalShifter, EmaComputer, FeatureConfig, FeatureError, FeatureMatrix,
    FeatureSetAssembler, InMemorySource, LABEL_COLUMN, PipelineError, PriceRatioComputer,
    ReturnComputer, TimeSeriesFrame, TrainingSet, VolatilityComputer, VolumeComputer,
    load_config_from_str,
};
use causal_ports::{MarketDataSource, SourceError, SourceResult};

const FOUR_HOURS_MS: i64 = 4 * 60 * 60 * 1000;
const START_MS: i64 = 1_704_067_200_000;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bars_from(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| {
            Bar::from_millis(START_MS + i as i64 * FOUR_HOURS_MS, c, c * 1.01, c * 0.99, c, v).unwrap()
        })
        .collect()
}

/// Deterministic wandering price path with varying volume
fn market(n: usize) -> TimeSeriesFrame {
    let closes: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64;
            40_000.0 * (1.0 + 0.05 * (x * 0.17).sin() + 0.02 * (x * 0.05).cos() + 0.001 * x)
        })
        .collect();
    let volumes: Vec<f64> = (0..n)
        .map(|i| 500.0 + 300.0 * ((i as f64) * 0.31).sin().abs())
        .collect();
    TimeSeriesFrame::from_bars(&bars_from(&closes, &volumes)).unwrap()
}

/// Unshifted blocks, computed directly with the default configuration
fn unshifted(frame: &TimeSeriesFrame) -> FeatureMatrix {
    let close = frame.column("close").unwrap();
    let volume = frame.column("volume").unwrap();
    let returns = ReturnComputer::new(&[1, 3, 6, 12]).unwrap().compute(&close).unwrap();
    let emas = EmaComputer::new(&[12, 24, 48]).unwrap().compute(&close).unwrap();
    let ratios = PriceRatioComputer::new(&[12, 24, 48])
        .unwrap()
        .compute(&close, &emas)
        .unwrap();
    let vol = VolatilityComputer::new(&[24, 72])
        .unwrap()
        .compute(returns.column("ret_1").unwrap())
        .unwrap();
    let volume = VolumeComputer::new(30).unwrap().compute(&volume).unwrap();
    FeatureMatrix::concat(frame.index(), [returns, emas, ratios, vol, volume]).unwrap()
}

// === Testable properties ===

#[test]
fn test_return_formula() {
    let frame = market(60);
    let closes = frame.values("close").unwrap();
    let close = frame.column("close").unwrap();
    let block = ReturnComputer::new(&[1, 3, 6, 12]).unwrap().compute(&close).unwrap();

    for n in [1usize, 3, 6, 12] {
        let col = block.column(&format!("ret_{n}")).unwrap();
        for t in 0..frame.len() {
            if t < n {
                assert_eq!(col.get(t), None, "ret_{n}[{t}] should be unknown");
            } else {
                assert_relative_eq!(col.get(t).unwrap(), (closes[t] / closes[t - n]).ln());
            }
        }
    }
}

#[test]
fn test_shift_law_against_unshifted_blocks() {
    init_logger();
    let frame = market(120);
    let raw = unshifted(&frame);
    let out = FeatureSetAssembler::default().build(&frame, false).unwrap();

    assert_eq!(out.column_names(), raw.column_names());
    for name in raw.column_names() {
        assert_eq!(out.value(name, 0), None, "{name}[0] must be unknown after the shift");
        for t in 1..frame.len() {
            assert_eq!(out.value(name, t), raw.value(name, t - 1), "{name}[{t}]");
        }
    }
}

#[test]
fn test_label_formula_and_no_shift() {
    let frame = market(40);
    let closes = frame.values("close").unwrap();
    let out = FeatureSetAssembler::default().build(&frame, true).unwrap();
    let label = out.column(LABEL_COLUMN).unwrap();

    let last = frame.len() - 1;
    for t in 0..last {
        assert_relative_eq!(label.get(t).unwrap(), (closes[t + 1] / closes[t]).ln());
    }
    assert_eq!(label.get(last), None);
    // Row 0 is unknown for every feature but the label is defined there
    assert!(label.get(0).is_some());
}

#[test]
fn test_determinism() {
    let frame = market(200);
    let assembler = FeatureSetAssembler::default();
    let first = assembler.build(&frame, true).unwrap();
    let second = assembler.build(&frame, true).unwrap();
    assert_eq!(first, second);

    for name in first.column_names() {
        let a = first.column(name).unwrap().values();
        let b = second.column(name).unwrap().values();
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.map(f64::to_bits), y.map(f64::to_bits));
        }
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let frame = market(150);
    let parallel = FeatureSetAssembler::new(FeatureConfig::default().with_parallel(true))
        .build(&frame, true)
        .unwrap();
    let sequential = FeatureSetAssembler::new(FeatureConfig::default().with_parallel(false))
        .build(&frame, true)
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_adv_window() {
    let frame = market(80);
    let volumes = frame.values("volume").unwrap();
    let block = VolumeComputer::new(30)
        .unwrap()
        .compute(&frame.column("volume").unwrap())
        .unwrap();
    let adv = block.column("adv_30").unwrap();

    for t in 0..29 {
        assert_eq!(adv.get(t), None);
    }
    for t in 29..frame.len() {
        let mean = volumes[t - 29..=t].iter().sum::<f64>() / 30.0;
        assert_relative_eq!(adv.get(t).unwrap(), mean, max_relative = 1e-12);
    }
}

#[test]
fn test_ema_constancy() {
    let n = 100;
    let frame = TimeSeriesFrame::from_bars(&bars_from(&vec![250.0; n], &vec![10.0; n])).unwrap();
    let out = FeatureSetAssembler::default().build(&frame, false).unwrap();

    for w in [12, 24, 48] {
        let ema = out.column(&format!("ema_{w}")).unwrap();
        let ratio = out.column(&format!("close_ema_{w}_ratio")).unwrap();
        for t in 1..n {
            assert_relative_eq!(ema.get(t).unwrap(), 250.0, max_relative = 1e-12);
            assert_relative_eq!(ratio.get(t).unwrap(), 0.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_causality_under_perturbation() {
    let frame = market(100);
    let baseline = FeatureSetAssembler::default().build(&frame, false).unwrap();

    // Change bar k: shifted rows 0..=k must not move
    let k = 60;
    let mut bars: Vec<Bar> = (0..frame.len()).map(|t| frame.bar(t).unwrap().unwrap()).collect();
    bars[k].close *= 1.5;
    bars[k].high = bars[k].close * 1.01;
    bars[k].volume *= 7.0;
    let perturbed_frame = TimeSeriesFrame::from_bars(&bars).unwrap();
    let perturbed = FeatureSetAssembler::default().build(&perturbed_frame, false).unwrap();

    for t in 0..=k {
        assert_eq!(baseline.row(t), perturbed.row(t), "row {t} leaked bar {k}");
    }
    assert_ne!(baseline.row(k + 1), perturbed.row(k + 1));
}

// === Scenarios ===

#[test]
fn test_scenario_a_ret_1_before_and_after_shift() {
    let closes = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
    let frame = TimeSeriesFrame::from_bars(&bars_from(&closes, &[1.0; 6])).unwrap();

    let raw = ReturnComputer::new(&[1])
        .unwrap()
        .compute(&frame.column("close").unwrap())
        .unwrap();
    let ret_1 = raw.column("ret_1").unwrap();
    assert_eq!(ret_1.get(0), None);
    for t in 1..6 {
        assert_relative_eq!(ret_1.get(t).unwrap(), (closes[t] / closes[t - 1]).ln());
    }

    let shifted = CausalShifter::new().apply(&raw).unwrap();
    let ret_1 = shifted.column("ret_1").unwrap();
    assert_eq!(ret_1.get(0), None);
    assert_eq!(ret_1.get(1), None);
    assert_relative_eq!(ret_1.get(2).unwrap(), (101.0f64 / 100.0).ln());
    assert_relative_eq!(ret_1.get(5).unwrap(), (104.0f64 / 103.0).ln());

    let out = FeatureSetAssembler::default().build(&frame, false).unwrap();
    assert_eq!(out.column("ret_1").unwrap(), ret_1);
}

#[test]
fn test_scenario_b_zero_volume() {
    let volumes = [0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 60.0];
    let frame = TimeSeriesFrame::from_bars(&bars_from(&[100.0; 7], &volumes)).unwrap();

    let block = VolumeComputer::new(30)
        .unwrap()
        .compute(&frame.column("volume").unwrap())
        .unwrap();
    let log_volume = block.column("log_volume").unwrap();
    for t in 0..5 {
        assert_eq!(log_volume.get(t), Some(0.0));
    }

    let out = FeatureSetAssembler::default().build(&frame, false).unwrap();
    for t in 1..=5 {
        assert_eq!(out.value("log_volume", t), Some(0.0));
    }
    assert_relative_eq!(out.value("log_volume", 6).unwrap(), 50.0f64.ln());
}

#[test]
fn test_scenario_c_missing_volume() {
    let frame = market(10).without_column("volume");
    let err = FeatureSetAssembler::default().build(&frame, true).unwrap_err();
    assert_eq!(err, FeatureError::MissingColumn(vec!["volume".to_string()]));
}

#[test]
fn test_missing_columns_all_named() {
    let frame = market(10).without_column("open").without_column("close");
    let err = FeatureSetAssembler::default().build(&frame, false).unwrap_err();
    assert_eq!(
        err,
        FeatureError::MissingColumn(vec!["open".to_string(), "close".to_string()])
    );
}

#[test]
fn test_scenario_d_missing_ema_span() {
    let frame = market(10);
    let close = frame.column("close").unwrap();
    let emas = EmaComputer::new(&[12, 24, 48]).unwrap().compute(&close).unwrap();
    let err = PriceRatioComputer::new(&[99])
        .unwrap()
        .compute(&close, &emas)
        .unwrap_err();
    assert_eq!(err, FeatureError::MissingColumn(vec!["ema_99".to_string()]));
}

#[test]
fn test_scenario_e_zero_return_period() {
    assert!(matches!(
        ReturnComputer::new(&[0]),
        Err(FeatureError::InvalidWindow { value: 0, .. })
    ));
    assert!(matches!(
        FeatureConfig::new(&[0], &[12], &[24], 30),
        Err(FeatureError::InvalidWindow { value: 0, .. })
    ));
}

// === Boundaries and supplements ===

#[test]
fn test_input_frame_is_not_mutated() {
    let frame = market(50);
    let before = frame.clone();
    let _ = FeatureSetAssembler::default().build(&frame, true).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn test_empty_frame() {
    let frame = TimeSeriesFrame::from_bars(&[]).unwrap();
    let out = FeatureSetAssembler::default().build(&frame, true).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.width(), 15);
}

#[test]
fn test_build_from_source() {
    init_logger();
    let source = InMemorySource::new().with_frame("BTC/USDT", market(120));
    let assembler = FeatureSetAssembler::default();

    let out = assembler.build_from_source(&source, "BTC/USDT", true).unwrap();
    assert_eq!(out.len(), 120);

    let err = assembler.build_from_source(&source, "ETH/USDT", true).unwrap_err();
    assert_eq!(
        err,
        PipelineError::Source(SourceError::NoData("ETH/USDT".to_string()))
    );
}

/// Adapter whose upstream is down
struct OfflineSource;

impl MarketDataSource for OfflineSource {
    fn fetch(&self, symbol: &str) -> SourceResult<TimeSeriesFrame> {
        Err(SourceError::Unavailable(format!("connection refused while fetching {symbol}")))
    }
}

/// Adapter that builds its frame from raw bars as received
struct RawBarSource {
    bars: Vec<Bar>,
}

impl MarketDataSource for RawBarSource {
    fn fetch(&self, _symbol: &str) -> SourceResult<TimeSeriesFrame> {
        Ok(TimeSeriesFrame::from_bars(&self.bars)?)
    }

    fn name(&self) -> &str {
        "RawBarSource"
    }
}

#[test]
fn test_build_from_source_distinguishes_failures() {
    init_logger();
    let assembler = FeatureSetAssembler::default();

    let err = assembler.build_from_source(&OfflineSource, "BTC/USDT", true).unwrap_err();
    assert!(matches!(err, PipelineError::Source(SourceError::Unavailable(_))));
    assert_eq!(OfflineSource.name(), "MarketDataSource");

    let frame = market(40);
    let mut bars: Vec<Bar> = (0..frame.len()).map(|t| frame.bar(t).unwrap().unwrap()).collect();
    let ok = RawBarSource { bars: bars.clone() };
    assert_eq!(
        assembler.build_from_source(&ok, "BTC/USDT", true).unwrap(),
        assembler.build(&frame, true).unwrap()
    );

    // A replayed bar repeats its timestamp
    bars.push(bars[bars.len() - 1]);
    let replayed = RawBarSource { bars };
    let err = assembler.build_from_source(&replayed, "BTC/USDT", true).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Source(SourceError::Frame(FeatureError::InvalidIndex(_)))
    ));
}

#[test]
fn test_windows_longer_than_history_stay_unknown() {
    init_logger();
    let frame = market(40);

    let config = load_config_from_str(r#"{ "adv_window": 1000000000000000 }"#).unwrap();
    let out = FeatureSetAssembler::new(config).build(&frame, false).unwrap();
    let adv = out.column("adv_1000000000000000").unwrap();
    assert_eq!(adv.len(), 40);
    assert_eq!(adv.known_count(), 0);
    assert!(out.column("log_volume").unwrap().known_count() > 0);

    let config = FeatureConfig::new(&[1], &[12], &[i64::MAX], 30).unwrap();
    for parallel in [true, false] {
        let out = FeatureSetAssembler::new(config.clone().with_parallel(parallel))
            .build(&frame, true)
            .unwrap();
        let rv = out.column("rv_9223372036854775807").unwrap();
        assert_eq!(rv.len(), 40);
        assert_eq!(rv.known_count(), 0);
        assert_eq!(out.column("ret_1").unwrap().first_known(), Some(2));
    }
}

#[test]
fn test_training_set_drops_warm_up_and_last_row() {
    let frame = market(150);
    let out = FeatureSetAssembler::default().build(&frame, true).unwrap();
    let set = TrainingSet::from_matrix(&out).unwrap();

    // rv_72 is the longest warm-up: unshifted row 72, shifted row 73.
    // The last row has no label.
    assert_eq!(set.len(), 150 - 73 - 1);
    assert_eq!(set.feature_names().len(), 14);
    assert!(!set.feature_names().iter().any(|n| n == LABEL_COLUMN));
    assert_eq!(set.timestamps().first(), out.index().get(73).as_ref());
    assert!(set.rows().iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn test_custom_configuration() {
    let config = FeatureConfig::new(&[2], &[5], &[3], 4).unwrap();
    let out = FeatureSetAssembler::new(config).build(&market(30), false).unwrap();
    assert_eq!(
        out.column_names(),
        vec!["ret_2", "ema_5", "close_ema_5_ratio", "rv_3", "log_volume", "adv_4"]
    );
    assert_eq!(out.column("adv_4").unwrap().first_known(), Some(4));
}
