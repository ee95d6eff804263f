//! Trend report over a synthetic daily cycle with a level shift
//!
//! Run with `RUST_LOG=metric_trend=debug` to see the pipeline's decisions.

use metric_core::{test_data, TimeSeriesPoint};
use metric_trend::{TrendAnalyzer, TrendParameters};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Trend Report ===\n");

    // Four days of 5-minute samples: a daily cycle that jumps 30 units on day three
    let cycle = test_data::sinusoid(4 * 288, 288, 100.0, 20.0, 2.0, 11);
    let series: Vec<TimeSeriesPoint> = cycle
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let shift = if i >= 2 * 288 { 30.0 } else { 0.0 };
            TimeSeriesPoint::new(p.timestamp, p.value + shift)
        })
        .collect();

    let analyzer = TrendAnalyzer::new(TrendParameters::default())?;
    let report = analyzer.analyze(&series)?;

    let trend = &report.linear_trend;
    println!("1. Linear trend");
    println!(
        "  {} ({}), slope {:.4}/sample, r² {:.3}, change {:+.1}%",
        trend.direction, trend.strength, trend.slope, trend.r_squared, trend.percent_change
    );

    println!("\n2. Seasonality");
    match report.seasonality.pattern {
        Some(pattern) if report.seasonality.detected => println!(
            "  {} cycle of {} samples, strength {:.3}",
            pattern, report.seasonality.period, report.seasonality.strength
        ),
        _ => println!("  none"),
    }

    println!("\n3. Change points");
    for cp in report.change_points.iter().take(5) {
        println!("  {cp}");
    }
    if report.change_points.len() > 5 {
        println!("  ... {} more", report.change_points.len() - 5);
    }

    println!("\n4. Forecast");
    for (point, ci) in report.forecast.values.iter().zip(&report.forecast.confidence) {
        println!(
            "  {}  {:8.2}  [{:8.2}, {:8.2}]",
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.value,
            ci.lower,
            ci.upper
        );
    }

    println!("\n{}", serde_json::to_string_pretty(&report.linear_trend)?);
    Ok(())
}
