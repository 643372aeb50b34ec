//! Impulse response measurement of the up/down conversion chain.

use super::common::{linear_to_db, parse_factor};
use clap::Args;
use halfband_core::{Engine, EngineConfig, OversamplingFactor};
use halfband_dsp::MonoPassthrough;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Oversampling factor (omit to measure every factor)
    #[arg(short, long, value_parser = parse_factor)]
    factor: Option<OversamplingFactor>,

    /// Response length in host frames
    #[arg(long, default_value = "1024")]
    length: usize,

    /// Print the first N response samples
    #[arg(long, default_value = "0")]
    samples: usize,
}

/// Summary of one impulse response.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseReport {
    /// Index of the largest magnitude sample.
    pub peak_index: usize,
    /// Value at `peak_index`.
    pub peak_value: f32,
    /// Sum of the response (gain at DC).
    pub dc_gain: f32,
    /// The response itself.
    pub response: Vec<f32>,
}

/// Runs a unit impulse through `Engine<MonoPassthrough>` at `factor`.
pub fn measure(factor: OversamplingFactor, length: usize) -> anyhow::Result<ImpulseReport> {
    let config = EngineConfig::for_processor::<MonoPassthrough>(factor);
    let mut engine = Engine::<MonoPassthrough>::new(config)?;
    engine.init(48000.0);

    let mut input = vec![0.0_f32; length];
    if let Some(first) = input.first_mut() {
        *first = 1.0;
    }
    let mut response = vec![0.0_f32; length];
    engine.process(&[&input], &mut [&mut response], length);

    let (peak_index, peak_value) = response
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0_f32), |best, (i, v)| {
            if v.abs() > best.1.abs() { (i, v) } else { best }
        });

    Ok(ImpulseReport {
        peak_index,
        peak_value,
        dc_gain: response.iter().sum(),
        response,
    })
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.length == 0 {
        anyhow::bail!("length must be at least 1");
    }

    let factors = match args.factor {
        Some(factor) => vec![factor],
        None => OversamplingFactor::ALL.to_vec(),
    };

    println!(
        "  {:>6} {:>6} {:>10} {:>10} {:>12}",
        "factor", "peak@", "peak", "dc gain", "dc gain dB"
    );
    for factor in factors {
        let report = measure(factor, args.length)?;
        println!(
            "  {:>5}x {:>6} {:>10.6} {:>10.6} {:>12.6}",
            factor.multiplier(),
            report.peak_index,
            report.peak_value,
            report.dc_gain,
            linear_to_db(report.dc_gain.abs())
        );
        if args.samples > 0 {
            for (i, v) in report.response.iter().take(args.samples).enumerate() {
                println!("    [{i:>4}] {v:+.8}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bypass_is_a_unit_impulse() {
        let report = measure(OversamplingFactor::X1, 16).unwrap();
        assert_eq!(report.peak_index, 0);
        assert_eq!(report.peak_value, 1.0);
        assert_eq!(report.dc_gain, 1.0);
    }

    #[test]
    fn oversampled_chain_is_delayed_with_unit_dc_gain() {
        for factor in [OversamplingFactor::X2, OversamplingFactor::X16] {
            let report = measure(factor, 1024).unwrap();
            assert!(report.peak_index > 0 && report.peak_index < 32);
            assert!((report.dc_gain - 1.0).abs() < 1e-3, "{factor:?}: {}", report.dc_gain);
        }
    }
}
