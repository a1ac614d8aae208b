//! Native balances outside the ledger.
//!
//! The ledger moves value out only through a [`ValueSink`]. [`Wallets`] is
//! the in-memory implementation: it holds every account's native balance
//! and plays the role of the surrounding execution environment, debiting a
//! sender before a contribution and refunding it if the call fails.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Result, TransferError};
use crate::ledger::FundingLedger;
use crate::types::{Address, ContributionReceipt, WithdrawalReceipt};

/// Destination for value leaving the ledger.
pub trait ValueSink {
    /// Credit `amount` to `to`. On error nothing is credited.
    fn credit(&mut self, to: &Address, amount: u128) -> std::result::Result<(), TransferError>;
}

/// In-memory native balances.
#[derive(Debug, Default, Clone)]
pub struct Wallets {
    balances: HashMap<Address, u128>,
    frozen: HashSet<Address>,
}

impl Wallets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Native balance of `account`
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Create `amount` out of thin air, like a local network's prefunded signers.
    pub fn mint(&mut self, account: Address, amount: u128) -> std::result::Result<(), TransferError> {
        let entry = self.balances.entry(account).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Remove `amount` from `account`.
    pub fn debit(&mut self, account: &Address, amount: u128) -> std::result::Result<(), TransferError> {
        let available = self.balance_of(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientFunds {
                needed: amount,
                available,
            })?;
        self.balances.insert(*account, remaining);
        Ok(())
    }

    /// Refuse all further credits to `account`.
    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    pub fn unfreeze(&mut self, account: &Address) {
        self.frozen.remove(account);
    }

    pub fn is_frozen(&self, account: &Address) -> bool {
        self.frozen.contains(account)
    }

    // ========================================================================
    // Calls into the ledger
    // ========================================================================

    /// Send `value` from `from` into `ledger` as a contribution.
    ///
    /// The value leaves `from` only if the ledger accepts it.
    pub fn fund(
        &mut self,
        ledger: &mut FundingLedger,
        from: Address,
        value: u128,
    ) -> Result<ContributionReceipt> {
        self.debit(&from, value)?;

        match ledger.contribute(from, value) {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                // A frozen sender still gets refunded.
                self.deposit(&from, value)?;
                debug!(from = %from, value, "contribution refunded");
                Err(e)
            }
        }
    }

    fn deposit(&mut self, to: &Address, amount: u128) -> std::result::Result<(), TransferError> {
        let updated = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.balances.insert(*to, updated);
        Ok(())
    }

    /// Ask `ledger` to pay its balance out to its owner through these wallets.
    pub fn withdraw(&mut self, ledger: &mut FundingLedger, caller: Address) -> Result<WithdrawalReceipt> {
        ledger.withdraw(caller, self)
    }
}

impl ValueSink for Wallets {
    fn credit(&mut self, to: &Address, amount: u128) -> std::result::Result<(), TransferError> {
        if self.frozen.contains(to) {
            return Err(TransferError::Frozen(*to));
        }
        self.deposit(to, amount)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::LedgerError;
    use crate::oracle::MockV3Aggregator;
    use crate::types::amount::{to_wei, WEI_PER_UNIT};

    #[test]
    fn test_mint_and_debit() {
        let alice = Address::from_seed(b"alice");
        let mut wallets = Wallets::new();

        wallets.mint(alice, 10).unwrap();
        wallets.debit(&alice, 4).unwrap();
        assert_eq!(wallets.balance_of(&alice), 6);

        assert_eq!(
            wallets.debit(&alice, 7),
            Err(TransferError::InsufficientFunds { needed: 7, available: 6 })
        );
        assert_eq!(wallets.balance_of(&alice), 6);
    }

    #[test]
    fn test_credit_overflow() {
        let alice = Address::from_seed(b"alice");
        let mut wallets = Wallets::new();
        wallets.mint(alice, u128::MAX).unwrap();

        assert_eq!(wallets.credit(&alice, 1), Err(TransferError::Overflow));
        assert_eq!(wallets.mint(alice, 1), Err(TransferError::Overflow));
        assert_eq!(wallets.balance_of(&alice), u128::MAX);
    }

    #[test]
    fn test_frozen_refuses_credit() {
        let alice = Address::from_seed(b"alice");
        let mut wallets = Wallets::new();

        wallets.freeze(alice);
        assert!(wallets.is_frozen(&alice));
        assert_eq!(wallets.credit(&alice, 1), Err(TransferError::Frozen(alice)));

        wallets.unfreeze(&alice);
        assert!(wallets.credit(&alice, 1).is_ok());
        assert_eq!(wallets.balance_of(&alice), 1);
    }

    #[test]
    fn test_fund_moves_value() {
        let owner = Address::from_seed(b"deployer");
        let alice = Address::from_seed(b"alice");
        let mut ledger = FundingLedger::new(owner, Arc::new(MockV3Aggregator::default()));
        let mut wallets = Wallets::new();
        wallets.mint(alice, 10 * WEI_PER_UNIT).unwrap();

        wallets.fund(&mut ledger, alice, WEI_PER_UNIT).unwrap();

        assert_eq!(wallets.balance_of(&alice), 9 * WEI_PER_UNIT);
        assert_eq!(ledger.balance(), WEI_PER_UNIT);
    }

    #[test]
    fn test_fund_refunds_rejected_value() {
        let owner = Address::from_seed(b"deployer");
        let alice = Address::from_seed(b"alice");
        let mut ledger = FundingLedger::new(owner, Arc::new(MockV3Aggregator::default()));
        let mut wallets = Wallets::new();
        wallets.mint(alice, WEI_PER_UNIT).unwrap();

        let result = wallets.fund(&mut ledger, alice, to_wei("0.0002").unwrap());

        assert!(matches!(result, Err(LedgerError::InsufficientContribution { .. })));
        assert_eq!(wallets.balance_of(&alice), WEI_PER_UNIT);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_fund_without_funds() {
        let owner = Address::from_seed(b"deployer");
        let alice = Address::from_seed(b"alice");
        let mut ledger = FundingLedger::new(owner, Arc::new(MockV3Aggregator::default()));
        let mut wallets = Wallets::new();

        let result = wallets.fund(&mut ledger, alice, WEI_PER_UNIT);

        assert!(matches!(
            result,
            Err(LedgerError::Transfer(TransferError::InsufficientFunds { .. }))
        ));
        assert_eq!(ledger.funder_count(), 0);
    }

    #[test]
    fn test_fund_refunds_frozen_sender() {
        let owner = Address::from_seed(b"deployer");
        let alice = Address::from_seed(b"alice");
        let mut ledger = FundingLedger::new(owner, Arc::new(MockV3Aggregator::default()));
        let mut wallets = Wallets::new();
        wallets.mint(alice, u128::MAX).unwrap();
        wallets.freeze(alice);

        let result = wallets.fund(&mut ledger, alice, 1);

        assert!(matches!(result, Err(LedgerError::InsufficientContribution { .. })));
        assert_eq!(wallets.balance_of(&alice), u128::MAX);
        assert_eq!(wallets.credit(&alice, 1), Err(TransferError::Frozen(alice)));
    }
}
