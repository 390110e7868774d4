//! Separative work (SWU) for uranium enrichment.

use crate::error::FleetError;

fn assay(name: &'static str, x: f64) -> Result<f64, FleetError> {
    if x > 0.0 && x < 1.0 {
        Ok(x)
    } else {
        Err(FleetError::InvalidAssay { name, value: x })
    }
}

/// Value function `V(x) = (2x - 1) ln(x / (1 - x))` of a stream with
/// U-235 mass fraction `x`.
///
/// # Errors
///
/// Returns `FleetError::InvalidAssay` unless `0 < x < 1`.
pub fn separation_potential(x: f64) -> Result<f64, FleetError> {
    let x = assay("assay", x)?;
    Ok((2.0 * x - 1.0) * (x / (1.0 - x)).ln())
}

/// Mass of tails produced alongside `product`.
///
/// # Errors
///
/// Returns `FleetError::InvalidAssay` for a fraction outside (0, 1) or
/// when the tails and feed assays are equal.
pub fn tails_mass(product: f64, x_p: f64, x_t: f64, x_f: f64) -> Result<f64, FleetError> {
    let (x_p, x_t, x_f) = (assay("x_p", x_p)?, assay("x_t", x_t)?, assay("x_f", x_f)?);
    if x_t == x_f {
        return Err(FleetError::InvalidAssay {
            name: "x_t",
            value: x_t,
        });
    }
    Ok((x_f - x_p) * product / (x_t - x_f))
}

/// Feed mass needed for `product` and `tails`.
pub fn feed_mass(product: f64, tails: f64) -> f64 {
    product + tails
}

/// Separative work units for the given product, tails, and feed streams.
///
/// # Errors
///
/// Returns `FleetError::InvalidAssay` for any fraction outside (0, 1).
pub fn swu(product: f64, x_p: f64, tails: f64, x_t: f64, feed: f64, x_f: f64) -> Result<f64, FleetError> {
    Ok(product * separation_potential(x_p)? + tails * separation_potential(x_t)?
        - feed * separation_potential(x_f)?)
}

/// SWU needed at each step to enrich the product masses in `product`
/// (for example a `CommodityFlow::quantity` column) from feed assay `x_f`
/// to `x_p`, leaving tails at `x_t`.
///
/// # Errors
///
/// Returns `FleetError::InvalidAssay` as `tails_mass` and `swu` do.
pub fn swu_per_step(product: &[f64], x_p: f64, x_t: f64, x_f: f64) -> Result<Vec<f64>, FleetError> {
    product
        .iter()
        .map(|&p| {
            let tails = tails_mass(p, x_p, x_t, x_f)?;
            swu(p, x_p, tails, x_t, feed_mass(p, tails), x_f)
        })
        .collect()
}
