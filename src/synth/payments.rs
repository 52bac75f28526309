use super::catalog::{CATALOG_YEAR, MONTH_NAMES, PAYMENT_MODES};
use super::model::{FeeSnapshot, FeeStatus, FeeType, PaymentRecord, PaymentStatus};
use super::rng::{chance, int_between, pick, RandomSource};

/// Yearly plans are billed as eleven months.
pub const YEARLY_BILLED_MONTHS: u32 = 11;

fn paid_record(
    rng: &mut dyn RandomSource,
    student_seq: usize,
    month: u32,
    amount: u32,
    status: PaymentStatus,
) -> PaymentRecord {
    let day = int_between(rng, 5, 20);
    let mode = pick(rng, PAYMENT_MODES).to_string();
    let txn = int_between(rng, 0, 99_999_999);
    PaymentRecord {
        id: format!("pay-{}-{:02}", student_seq + 1, month),
        date: format!("{}-{:02}-{:02}", CATALOG_YEAR, month, day),
        month: format!("{} {}", MONTH_NAMES[(month - 1) as usize], CATALOG_YEAR),
        amount,
        mode,
        transaction_id: Some(format!("TXN{:08}", txn)),
        receipt_no: Some(format!(
            "RCP{}{:02}{:04}",
            CATALOG_YEAR,
            month,
            student_seq + 1
        )),
        status,
    }
}

pub fn generate_payment_history(
    rng: &mut dyn RandomSource,
    monthly_fee: u32,
    fee_type: FeeType,
    student_seq: usize,
) -> Vec<PaymentRecord> {
    if fee_type == FeeType::Yearly {
        return vec![paid_record(
            rng,
            student_seq,
            1,
            monthly_fee * YEARLY_BILLED_MONTHS,
            PaymentStatus::Paid,
        )];
    }

    let mut out: Vec<PaymentRecord> = Vec::with_capacity(12);
    for month in (1..=12u32).rev() {
        if chance(rng, 0.9) {
            let status = if chance(rng, 0.2) {
                PaymentStatus::Late
            } else {
                PaymentStatus::Paid
            };
            out.push(paid_record(rng, student_seq, month, monthly_fee, status));
        } else {
            let day = int_between(rng, 5, 20);
            out.push(PaymentRecord {
                id: format!("pay-{}-{:02}", student_seq + 1, month),
                date: format!("{}-{:02}-{:02}", CATALOG_YEAR, month, day),
                month: format!("{} {}", MONTH_NAMES[(month - 1) as usize], CATALOG_YEAR),
                amount: monthly_fee,
                mode: String::new(),
                transaction_id: None,
                receipt_no: None,
                status: PaymentStatus::Pending,
            });
        }
    }
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Fee card for a student: totals from the batch plan, paid/due from history.
pub fn fee_snapshot(fee_type: FeeType, monthly_fee: u32, history: &[PaymentRecord]) -> FeeSnapshot {
    let yearly_fee = monthly_fee * YEARLY_BILLED_MONTHS;
    let total_fee = match fee_type {
        FeeType::Monthly => monthly_fee * 12,
        FeeType::Yearly => yearly_fee,
    };
    let paid_amount: u32 = history
        .iter()
        .filter(|p| p.status != PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum();
    let due_amount = total_fee.saturating_sub(paid_amount);
    let status = if due_amount == 0 {
        FeeStatus::Paid
    } else if paid_amount > 0 {
        FeeStatus::Partial
    } else {
        FeeStatus::Pending
    };
    FeeSnapshot {
        fee_type,
        monthly_fee,
        yearly_fee,
        total_fee,
        paid_amount,
        due_amount,
        status,
    }
}
