//! Loss reporting for the training loop

use serde::{Deserialize, Serialize};
use std::fmt;

/// Losses of one adversarial-autoencoder training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLosses {
    pub epoch: usize,
    /// Discriminator loss on the categorical code
    pub d_loss_cat: f64,
    /// Discriminator loss on the style code
    pub d_loss_gauss: f64,
    /// Generator (encoder) adversarial loss
    pub g_loss: f64,
    /// Reconstruction loss
    pub recon_loss: f64,
}

/// Format `value` with `digits` significant digits, dropping trailing zeros.
///
/// Magnitudes whose rounded exponent falls outside `[-4, digits)` switch to
/// scientific notation with a signed two-digit exponent (`1.235e+05`).
pub fn significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let text = trim_fraction(&format!("{value:.decimals$}"));
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

/// Strip trailing fractional zeros and a dangling decimal point.
fn trim_fraction(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for EpochLosses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Epoch-{}; D_loss_cat: {}; D_loss_gauss: {}; G_loss: {}; recon_loss: {}",
            self.epoch,
            significant(self.d_loss_cat, 4),
            significant(self.d_loss_gauss, 4),
            significant(self.g_loss, 4),
            significant(self.recon_loss, 4),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant(1.234_56, 4), "1.235");
        assert_eq!(significant(0.5, 4), "0.5");
        assert_eq!(significant(1.0, 4), "1.0");
        assert_eq!(significant(0.012_345_6, 4), "0.01235");
        assert_eq!(significant(-2.5, 4), "-2.5");
        assert_eq!(significant(0.0, 4), "0.0");
    }

    #[test]
    fn test_significant_scientific() {
        assert_eq!(significant(123_456.0, 4), "1.235e+05");
        assert_eq!(significant(-123_456.0, 4), "-1.235e+05");
        assert_eq!(significant(0.000_012_345_6, 4), "1.235e-05");
        assert_eq!(significant(1e5, 4), "1e+05");
    }

    #[test]
    fn test_significant_rounding_carries_exponent() {
        assert_eq!(significant(9999.6, 4), "1e+04");
        assert_eq!(significant(9.999_96, 4), "10.0");
        assert_eq!(significant(0.000_099_999, 4), "0.0001");
        assert_eq!(significant(1234.4, 4), "1234.0");
    }

    #[test]
    fn test_epoch_line() {
        let losses = EpochLosses {
            epoch: 3,
            d_loss_cat: 1.386_294,
            d_loss_gauss: 0.693_147,
            g_loss: 2.0,
            recon_loss: 0.104_21,
        };
        assert_eq!(
            losses.to_string(),
            "Epoch-3; D_loss_cat: 1.386; D_loss_gauss: 0.6931; G_loss: 2.0; recon_loss: 0.1042"
        );
    }
}
