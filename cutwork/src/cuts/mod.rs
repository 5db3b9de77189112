//! Cut planning (裁床)
//!
//! Turns a cut entry (number, name, total pieces, department rates) into a
//! `Cut` with its bundles and operations, and applies edits to an existing
//! cut.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Bundle, Cut, CutCreate, CutUpdate, Operation, OperationRate};
use shared::util::{new_id, now_millis};
use std::collections::HashSet;

/// Partition `1..=total_pieces` into bundles of `bundle_size`.
///
/// `ceil(total / size)` bundles numbered from 1; the last one may be short.
/// A non-positive total yields no bundles. More bundles than a `u32` can
/// number is rejected as an invalid total.
pub fn generate_bundles(total_pieces: i64, bundle_size: i64) -> AppResult<Vec<Bundle>> {
    if bundle_size <= 0 {
        return Err(AppError::new(ErrorCode::InvalidBundleSize).with_detail("bundle_size", bundle_size));
    }
    if total_pieces <= 0 {
        return Ok(Vec::new());
    }

    // both positive
    let count = (total_pieces as u64).div_ceil(bundle_size as u64);
    let count = u32::try_from(count).map_err(|_| {
        AppError::new(ErrorCode::InvalidTotalPieces)
            .with_detail("total_pieces", total_pieces)
            .with_detail("bundle_size", bundle_size)
    })?;

    let bundles = (0..count)
        .map(|n| {
            let start = i64::from(n) * bundle_size + 1;
            Bundle {
                id: new_id(),
                bundle_number: n + 1,
                start,
                end: start + (bundle_size - 1).min(total_pieces - start),
            }
        })
        .collect();
    Ok(bundles)
}

/// One operation per department with a positive rate, in entry order.
///
/// Department names are compared trimmed; naming one twice is rejected,
/// since each operation must keep a distinct id. When `existing` holds an
/// operation with the same name its id is kept, so assignments recorded
/// against it still resolve after an edit.
pub fn operations_from_rates(
    rates: &[OperationRate],
    existing: &[Operation],
) -> AppResult<Vec<Operation>> {
    let mut seen = HashSet::new();
    for rate in rates {
        let name = rate.name.trim();
        if !seen.insert(name) {
            return Err(AppError::new(ErrorCode::DuplicateOperationRate).with_detail("name", name));
        }
    }

    let operations = rates
        .iter()
        .filter(|rate| rate.price > Decimal::ZERO)
        .map(|rate| {
            let name = rate.name.trim().to_string();
            let id = existing
                .iter()
                .find(|op| op.name == name)
                .map(|op| op.id.clone())
                .unwrap_or_else(new_id);
            Operation {
                id,
                name,
                price: rate.price,
            }
        })
        .collect();
    Ok(operations)
}

fn clean_cut_number(cut_number: &str) -> AppResult<String> {
    let trimmed = cut_number.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(ErrorCode::CutNumberEmpty));
    }
    Ok(trimmed.to_string())
}

fn clean_cut_name(cut_name: Option<&str>) -> Option<String> {
    cut_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn require_positive_total(total_pieces: i64) -> AppResult<()> {
    if total_pieces <= 0 {
        return Err(
            AppError::new(ErrorCode::InvalidTotalPieces).with_detail("total_pieces", total_pieces)
        );
    }
    Ok(())
}

/// Build a new cut from an entry form.
///
/// Requires a cut number, a positive total and at least one positive rate.
pub fn plan_cut(data: CutCreate, default_bundle_size: i64) -> AppResult<Cut> {
    let cut_number = clean_cut_number(&data.cut_number)?;
    require_positive_total(data.total_pieces)?;

    let operations = operations_from_rates(&data.rates, &[])?;
    if operations.is_empty() {
        return Err(AppError::new(ErrorCode::NoOperationRates));
    }

    let bundle_size = data.bundle_size.unwrap_or(default_bundle_size);
    let bundles = generate_bundles(data.total_pieces, bundle_size)?;

    Ok(Cut {
        id: new_id(),
        cut_number,
        cut_name: clean_cut_name(data.cut_name.as_deref()),
        operations,
        total_pieces: data.total_pieces,
        bundles,
        created_at: now_millis(),
    })
}

/// Apply an edit, producing a new cut record.
///
/// Bundles are regenerated only when the total changes; the old bundle ids
/// are discarded and assignments that pointed at them become orphans.
pub fn revise_cut(existing: &Cut, data: CutUpdate, default_bundle_size: i64) -> AppResult<Cut> {
    let cut_number = match data.cut_number.as_deref() {
        Some(number) => clean_cut_number(number)?,
        None => existing.cut_number.clone(),
    };
    let cut_name = match data.cut_name.as_deref() {
        Some(name) => clean_cut_name(Some(name)),
        None => existing.cut_name.clone(),
    };

    let operations = match &data.rates {
        Some(rates) => {
            let operations = operations_from_rates(rates, &existing.operations)?;
            if operations.is_empty() {
                return Err(AppError::new(ErrorCode::NoOperationRates));
            }
            operations
        }
        None => existing.operations.clone(),
    };

    let total_pieces = data.total_pieces.unwrap_or(existing.total_pieces);
    require_positive_total(total_pieces)?;

    let bundles = if total_pieces != existing.total_pieces {
        let bundle_size = data.bundle_size.unwrap_or(default_bundle_size);
        tracing::info!(
            cut_id = %existing.id,
            old_total = existing.total_pieces,
            new_total = total_pieces,
            "Total pieces changed, regenerating bundles"
        );
        generate_bundles(total_pieces, bundle_size)?
    } else {
        existing.bundles.clone()
    };

    Ok(Cut {
        cut_number,
        cut_name,
        operations,
        total_pieces,
        bundles,
        ..existing.clone()
    })
}
