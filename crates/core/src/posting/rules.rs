//! Entry draft builders for the business's recurring transactions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::PaymentMethod;
use crate::accounts::{AccountCode, codes};
use crate::ledger::{EntryDraft, LineItem, SourceType};

/// Stateless builders mapping business operations to entry drafts.
///
/// Every builder returns a draft that balances by construction; the ledger
/// still validates it on post, so a bad rule can never corrupt the books.
pub struct PostingRules;

impl PostingRules {
    /// Purchase of raw cow skins from a vendor.
    ///
    /// Debits raw materials inventory, credits the settlement account
    /// (cash, bank, or accounts payable).
    #[must_use]
    pub fn purchase(
        date: NaiveDate,
        vendor: &str,
        cost: Decimal,
        method: PaymentMethod,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            format!("Purchase of raw materials from vendor {vendor}"),
            SourceType::Purchase,
            vec![
                LineItem::debit(codes::RAW_MATERIALS, cost),
                LineItem::credit(method.settlement_account(), cost),
            ],
        )
        .with_reference(reference)
    }

    /// Production run, stage 1: move raw materials into work in process.
    ///
    /// If `processing_cost` is nonzero the run also capitalizes it into
    /// work in process against operating expenses.
    #[must_use]
    pub fn production_start(
        date: NaiveDate,
        reference: &str,
        raw_materials_used: Decimal,
        processing_cost: Decimal,
    ) -> EntryDraft {
        let mut lines = vec![
            LineItem::debit(codes::WORK_IN_PROCESS, raw_materials_used),
            LineItem::credit(codes::RAW_MATERIALS, raw_materials_used),
        ];
        if !processing_cost.is_zero() {
            lines.push(LineItem::debit(codes::WORK_IN_PROCESS, processing_cost));
            lines.push(LineItem::credit(codes::OPERATING_EXPENSES, processing_cost));
        }

        EntryDraft::new(
            date,
            format!("Transfer raw materials to production - {reference}"),
            SourceType::Production,
            lines,
        )
        .with_reference(format!("PROD-{reference}"))
    }

    /// Production run, stage 2: complete the run into finished goods.
    ///
    /// The full accumulated cost (materials plus processing) moves from
    /// work in process to finished goods inventory.
    #[must_use]
    pub fn production_complete(
        date: NaiveDate,
        reference: &str,
        raw_materials_used: Decimal,
        processing_cost: Decimal,
    ) -> EntryDraft {
        let total = raw_materials_used + processing_cost;

        EntryDraft::new(
            date,
            format!("Complete production - {reference}"),
            SourceType::Production,
            vec![
                LineItem::debit(codes::FINISHED_GOODS, total),
                LineItem::credit(codes::WORK_IN_PROCESS, total),
            ],
        )
        .with_reference(format!("COMP-{reference}"))
    }

    /// Sale of finished goods to a customer.
    ///
    /// The revenue side depends on how much payment arrived with the sale:
    /// - paid in full: debit the settlement account; any overpayment is
    ///   credited to customer deposits
    /// - partial or unpaid: the shortfall is debited to accounts receivable
    ///
    /// If `cost_of_goods_sold` is nonzero the draft also relieves finished
    /// goods inventory into cost of goods sold.
    #[must_use]
    pub fn sale(
        date: NaiveDate,
        customer: &str,
        invoice: &str,
        sales_amount: Decimal,
        cost_of_goods_sold: Decimal,
        payment_received: Decimal,
        method: PaymentMethod,
    ) -> EntryDraft {
        let settlement = method.settlement_account();
        let mut lines = Vec::new();

        if payment_received >= sales_amount {
            lines.push(LineItem::debit(settlement, payment_received));
            let overpayment = payment_received - sales_amount;
            if !overpayment.is_zero() {
                lines.push(LineItem::credit(codes::CUSTOMER_DEPOSITS, overpayment));
            }
        } else {
            if !payment_received.is_zero() {
                lines.push(LineItem::debit(settlement, payment_received));
            }
            lines.push(LineItem::debit(
                codes::ACCOUNTS_RECEIVABLE,
                sales_amount - payment_received,
            ));
        }

        lines.push(LineItem::credit(codes::SALES_REVENUE, sales_amount));

        if !cost_of_goods_sold.is_zero() {
            lines.push(LineItem::debit(codes::COST_OF_GOODS_SOLD, cost_of_goods_sold));
            lines.push(LineItem::credit(codes::FINISHED_GOODS, cost_of_goods_sold));
        }

        EntryDraft::new(
            date,
            format!("Sale to customer {customer} - Invoice {invoice}"),
            SourceType::Sale,
            lines,
        )
        .with_reference(invoice)
    }

    /// Operating expense paid by the given method.
    ///
    /// Debits the expense account, credits cash/bank, or accounts payable
    /// for expenses incurred on credit.
    #[must_use]
    pub fn expense(
        date: NaiveDate,
        account: AccountCode,
        amount: Decimal,
        description: &str,
        method: PaymentMethod,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            description,
            SourceType::Expense,
            vec![
                LineItem::debit(account, amount),
                LineItem::credit(method.settlement_account(), amount),
            ],
        )
        .with_reference(reference)
    }

    /// Payment made to a vendor against accounts payable.
    ///
    /// Debits accounts payable (reducing the liability), credits the
    /// cash or bank account the payment came from.
    #[must_use]
    pub fn vendor_payment(
        date: NaiveDate,
        vendor: &str,
        amount: Decimal,
        method: PaymentMethod,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            format!("Payment to vendor {vendor}"),
            SourceType::Payment,
            vec![
                LineItem::debit(codes::ACCOUNTS_PAYABLE, amount),
                LineItem::credit(method.settlement_account(), amount),
            ],
        )
        .with_reference(reference)
    }

    /// Advance payment received from a customer.
    ///
    /// Debits cash/bank, credits the customer deposits liability.
    #[must_use]
    pub fn customer_deposit(
        date: NaiveDate,
        customer: &str,
        amount: Decimal,
        method: PaymentMethod,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            format!("Customer deposit from {customer}"),
            SourceType::Deposit,
            vec![
                LineItem::debit(method.settlement_account(), amount),
                LineItem::credit(codes::CUSTOMER_DEPOSITS, amount),
            ],
        )
        .with_reference(reference)
    }

    /// Application of a held customer deposit against the customer's
    /// receivable balance.
    #[must_use]
    pub fn apply_customer_deposit(
        date: NaiveDate,
        customer: &str,
        amount: Decimal,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            format!("Used customer deposit for sale - customer {customer}"),
            SourceType::Deposit,
            vec![
                LineItem::debit(codes::CUSTOMER_DEPOSITS, amount),
                LineItem::credit(codes::ACCOUNTS_RECEIVABLE, amount),
            ],
        )
        .with_reference(reference)
    }

    /// Payment received from a customer against their receivable balance.
    #[must_use]
    pub fn payment_received(
        date: NaiveDate,
        customer: &str,
        amount: Decimal,
        method: PaymentMethod,
        reference: &str,
    ) -> EntryDraft {
        EntryDraft::new(
            date,
            format!("Payment received from customer {customer}"),
            SourceType::Payment,
            vec![
                LineItem::debit(method.settlement_account(), amount),
                LineItem::credit(codes::ACCOUNTS_RECEIVABLE, amount),
            ],
        )
        .with_reference(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    use crate::accounts::ChartOfAccounts;
    use crate::ledger::{InMemoryStore, Ledger};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn ledger() -> Ledger {
        Ledger::new(
            Arc::new(ChartOfAccounts::standard()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn line_amounts(draft: &EntryDraft, account: AccountCode) -> (Decimal, Decimal) {
        draft
            .lines
            .iter()
            .filter(|line| line.account == account)
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), line| {
                (d + line.debit, c + line.credit)
            })
    }

    #[test]
    fn test_purchase_on_account() {
        let draft = PostingRules::purchase(
            day(1),
            "V-001",
            dec!(1000),
            PaymentMethod::OnAccount,
            "PO-1",
        );

        assert_eq!(
            line_amounts(&draft, codes::RAW_MATERIALS),
            (dec!(1000), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::ACCOUNTS_PAYABLE),
            (Decimal::ZERO, dec!(1000))
        );
        ledger().post(draft).unwrap();
    }

    #[test]
    fn test_purchase_cash_credits_cash() {
        let draft =
            PostingRules::purchase(day(1), "V-001", dec!(400), PaymentMethod::Cash, "PO-2");
        assert_eq!(
            line_amounts(&draft, codes::CASH_ON_HAND),
            (Decimal::ZERO, dec!(400))
        );
    }

    #[test]
    fn test_production_stages_balance() {
        let ledger = ledger();

        let start = PostingRules::production_start(day(2), "B-7", dec!(800), dec!(200));
        let complete = PostingRules::production_complete(day(3), "B-7", dec!(800), dec!(200));

        ledger.post(start).unwrap();
        ledger.post(complete).unwrap();

        // Raw materials are gone, work in process nets to zero, finished
        // goods carry the full run cost.
        assert_eq!(
            ledger.balance_as_of(codes::RAW_MATERIALS, day(28)).unwrap(),
            dec!(-800)
        );
        assert_eq!(
            ledger
                .balance_as_of(codes::WORK_IN_PROCESS, day(28))
                .unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            ledger.balance_as_of(codes::FINISHED_GOODS, day(28)).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_production_without_processing_cost_has_two_lines() {
        let draft = PostingRules::production_start(day(2), "B-8", dec!(500), Decimal::ZERO);
        assert_eq!(draft.lines.len(), 2);
    }

    #[test]
    fn test_credit_sale_books_receivable() {
        let draft = PostingRules::sale(
            day(4),
            "C-9",
            "INV-100",
            dec!(1500),
            dec!(1200),
            Decimal::ZERO,
            PaymentMethod::Cash,
        );

        assert_eq!(
            line_amounts(&draft, codes::ACCOUNTS_RECEIVABLE),
            (dec!(1500), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::SALES_REVENUE),
            (Decimal::ZERO, dec!(1500))
        );
        assert_eq!(
            line_amounts(&draft, codes::COST_OF_GOODS_SOLD),
            (dec!(1200), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::FINISHED_GOODS),
            (Decimal::ZERO, dec!(1200))
        );
        ledger().post(draft).unwrap();
    }

    #[test]
    fn test_partial_payment_splits_cash_and_receivable() {
        let draft = PostingRules::sale(
            day(4),
            "C-9",
            "INV-101",
            dec!(1000),
            Decimal::ZERO,
            dec!(400),
            PaymentMethod::Cash,
        );

        assert_eq!(
            line_amounts(&draft, codes::CASH_ON_HAND),
            (dec!(400), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::ACCOUNTS_RECEIVABLE),
            (dec!(600), Decimal::ZERO)
        );
        ledger().post(draft).unwrap();
    }

    #[test]
    fn test_overpayment_becomes_customer_deposit() {
        let draft = PostingRules::sale(
            day(4),
            "C-2",
            "INV-102",
            dec!(1000),
            Decimal::ZERO,
            dec!(1100),
            PaymentMethod::BankTransfer,
        );

        assert_eq!(
            line_amounts(&draft, codes::BANK_ACCOUNTS),
            (dec!(1100), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::CUSTOMER_DEPOSITS),
            (Decimal::ZERO, dec!(100))
        );
        ledger().post(draft).unwrap();
    }

    #[test]
    fn test_vendor_payment_reduces_payable() {
        let ledger = ledger();
        ledger
            .post(PostingRules::purchase(
                day(1),
                "V-1",
                dec!(1000),
                PaymentMethod::OnAccount,
                "PO-3",
            ))
            .unwrap();
        ledger
            .post(PostingRules::vendor_payment(
                day(5),
                "V-1",
                dec!(600),
                PaymentMethod::BankTransfer,
                "PAY-1",
            ))
            .unwrap();

        assert_eq!(
            ledger
                .balance_as_of(codes::ACCOUNTS_PAYABLE, day(28))
                .unwrap(),
            dec!(400)
        );
        assert_eq!(
            ledger.balance_as_of(codes::BANK_ACCOUNTS, day(28)).unwrap(),
            dec!(-600)
        );
    }

    #[test]
    fn test_deposit_lifecycle() {
        let ledger = ledger();
        ledger
            .post(PostingRules::customer_deposit(
                day(6),
                "C-5",
                dec!(300),
                PaymentMethod::Cash,
                "DEP-1",
            ))
            .unwrap();
        ledger
            .post(PostingRules::sale(
                day(7),
                "C-5",
                "INV-103",
                dec!(300),
                Decimal::ZERO,
                Decimal::ZERO,
                PaymentMethod::Cash,
            ))
            .unwrap();
        ledger
            .post(PostingRules::apply_customer_deposit(
                day(7),
                "C-5",
                dec!(300),
                "DEP-USE-1",
            ))
            .unwrap();

        assert_eq!(
            ledger
                .balance_as_of(codes::CUSTOMER_DEPOSITS, day(28))
                .unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            ledger
                .balance_as_of(codes::ACCOUNTS_RECEIVABLE, day(28))
                .unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_expense_on_account_credits_payable() {
        let draft = PostingRules::expense(
            day(8),
            codes::ADMINISTRATIVE_EXPENSES,
            dec!(75.50),
            "Office supplies",
            PaymentMethod::OnAccount,
            "EXP-1",
        );

        assert_eq!(
            line_amounts(&draft, codes::ADMINISTRATIVE_EXPENSES),
            (dec!(75.50), Decimal::ZERO)
        );
        assert_eq!(
            line_amounts(&draft, codes::ACCOUNTS_PAYABLE),
            (Decimal::ZERO, dec!(75.50))
        );
    }

    #[test]
    fn test_payment_received_clears_receivable() {
        let ledger = ledger();
        ledger
            .post(PostingRules::sale(
                day(4),
                "C-1",
                "INV-104",
                dec!(500),
                Decimal::ZERO,
                Decimal::ZERO,
                PaymentMethod::Cash,
            ))
            .unwrap();
        ledger
            .post(PostingRules::payment_received(
                day(9),
                "C-1",
                dec!(500),
                PaymentMethod::Cash,
                "RCPT-1",
            ))
            .unwrap();

        assert_eq!(
            ledger
                .balance_as_of(codes::ACCOUNTS_RECEIVABLE, day(28))
                .unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            ledger.balance_as_of(codes::CASH_ON_HAND, day(28)).unwrap(),
            dec!(500)
        );
    }
}
