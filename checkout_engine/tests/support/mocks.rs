use axm_common::Axm;
use checkout_engine::{
    traits::{LedgerError, NewOrder, OrderLedgerClient, TokenTransferClient, TransferError},
    types::{OrderId, TxId, WalletAddress},
};
use mockall::mock;

mock! {
    pub Wallet {}
    impl TokenTransferClient for Wallet {
        async fn balance(&self) -> Result<Axm, TransferError>;
        async fn transfer(&self, amount: Axm, to: &WalletAddress) -> Result<TxId, TransferError>;
    }
}

mock! {
    pub Ledger {}
    impl OrderLedgerClient for Ledger {
        async fn create_order(&self, order: NewOrder) -> Result<OrderId, LedgerError>;
    }
}
