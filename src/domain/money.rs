//! Arithmetic shared by quotations and trips.
//!
//! Every amount is an integer number of paise (1/100 INR).

use serde::Serialize;
use thiserror::Error;

/// GST applied to every trip.
pub const TRIP_GST_PERCENT: f64 = 5.0;

/// Default GST offered on new quotations.
pub const DEFAULT_QUOTATION_GST_PERCENT: f64 = 5.0;

/// GST owed on `total_paise` at `percent`, rounded to the nearest paisa.
pub fn gst_amount(total_paise: i64, percent: f64) -> i64 {
    (total_paise as f64 * percent / 100.0).round() as i64
}

/// Reasons a price breakdown cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("discount cannot exceed the subtotal")]
    DiscountExceedsSubtotal,
    #[error("amount is too large")]
    AmountTooLarge,
}

/// Price breakdown computed when a quotation or trip is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    /// `rate_per_head * pax + extras`.
    pub subtotal_paise: i64,
    /// Discount subtracted from the subtotal.
    pub discount_paise: i64,
    /// `subtotal - discount`, the taxable amount.
    pub total_amount_paise: i64,
    /// GST percentage applied to the total.
    pub gst_percentage: f64,
    /// GST amount owed on the total.
    pub gst_amount_paise: i64,
    /// `total_amount + gst_amount`.
    pub grand_total_paise: i64,
}

impl PriceBreakdown {
    /// Price `pax` travellers at `rate_per_head_paise` each.
    ///
    /// Fails when the discount exceeds the subtotal or the arithmetic overflows.
    pub fn compute(
        rate_per_head_paise: i64,
        pax: i32,
        extras_paise: i64,
        discount_paise: i64,
        gst_percentage: f64,
    ) -> Result<Self, PricingError> {
        let subtotal_paise = rate_per_head_paise
            .checked_mul(i64::from(pax))
            .and_then(|amount| amount.checked_add(extras_paise))
            .ok_or(PricingError::AmountTooLarge)?;
        let total_amount_paise = subtotal_paise
            .checked_sub(discount_paise)
            .ok_or(PricingError::AmountTooLarge)?;
        if total_amount_paise < 0 {
            return Err(PricingError::DiscountExceedsSubtotal);
        }
        let gst_amount_paise = gst_amount(total_amount_paise, gst_percentage);
        let grand_total_paise = total_amount_paise
            .checked_add(gst_amount_paise)
            .ok_or(PricingError::AmountTooLarge)?;

        Ok(Self {
            subtotal_paise,
            discount_paise,
            total_amount_paise,
            gst_percentage,
            gst_amount_paise,
            grand_total_paise,
        })
    }
}

/// Formats paise as rupees with Indian digit grouping, e.g. `₹12,34,567.50`.
pub fn format_inr(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    let rupees = (abs / 100).to_string();
    let fraction = abs % 100;

    let grouped = if rupees.len() <= 3 {
        rupees
    } else {
        let (head, tail) = rupees.split_at(rupees.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if fraction == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{fraction:02}")
    }
}
