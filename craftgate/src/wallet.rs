//! Wallet, remittance, and withdraw endpoints.
//!
//! Thin wrappers over the dispatch pipeline in [`crate::client`]: each method
//! builds a method + path + optional typed body and hands it to the client.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::CraftgateClient;
use crate::error::Error;
use crate::model::{
    Currency, GatewayDateTime, ListResponse, PaymentError, RefundCardTransactionType, Status,
    TransactionPayoutStatus,
};

/// Accessor for the wallet API, obtained from
/// [`CraftgateClient::wallet`](crate::CraftgateClient::wallet).
#[derive(Debug, Clone, Copy)]
pub struct Wallet<'a> {
    client: &'a CraftgateClient,
}

/// Balance reset request for the merchant's own wallet.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetMerchantMemberWalletBalanceRequest {
    /// New wallet balance.
    pub wallet_amount: f64,
}

/// Remittance send/receive request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemittanceRequest {
    /// Member the remittance is sent to or received from.
    pub member_id: i64,
    /// Remittance amount.
    pub price: f64,
    /// Free-form description.
    pub description: String,
    /// Gateway-defined remittance reason.
    pub remittance_reason_type: String,
}

/// Withdraw creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawRequest {
    /// Member whose balance is withdrawn.
    pub member_id: i64,
    /// Withdraw amount.
    pub price: f64,
    /// Free-form description.
    pub description: String,
    /// Withdraw currency.
    pub currency: Currency,
}

/// Refund-to-card request for a wallet transaction.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundWalletTransactionToCardRequest {
    /// Wallet transaction to refund. Sent in the path, not the body.
    #[serde(skip)]
    pub wallet_transaction_id: i64,
    /// Amount to refund to the card.
    pub refund_price: f64,
}

/// Wallet transaction search filters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWalletTransactionsRequest {
    /// Wallet whose transactions are listed. Sent in the path.
    #[serde(skip)]
    pub wallet_id: i64,
    /// Filter by transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_transaction_type: Option<String>,
    /// Zero-based page index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

/// Withdraw search filters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWithdrawsRequest {
    /// Filter by wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<i64>,
    /// Filter by payout status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_status: Option<String>,
    /// Filter by currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Minimum withdraw amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_withdraw_price: Option<f64>,
    /// Maximum withdraw amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_withdraw_price: Option<f64>,
    /// Earliest creation date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_created_date: Option<GatewayDateTime>,
    /// Latest creation date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_created_date: Option<GatewayDateTime>,
    /// Zero-based page index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

/// A member's wallet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWalletResponse {
    /// Wallet identifier.
    pub id: Option<i64>,
    /// Creation time.
    pub created_date: Option<GatewayDateTime>,
    /// Last update time.
    pub updated_date: Option<GatewayDateTime>,
    /// Current balance.
    pub amount: Option<f64>,
    /// Balance eligible for withdrawal.
    pub withdrawal_amount: Option<f64>,
    /// Wallet currency.
    pub currency: Option<Currency>,
    /// Owning member.
    pub member_id: Option<i64>,
}

/// A sent or received remittance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemittanceResponse {
    /// Remittance identifier.
    pub id: Option<i64>,
    /// Creation time.
    pub created_date: Option<GatewayDateTime>,
    /// Activity flag.
    pub active: Option<i32>,
    /// Remittance amount.
    pub price: Option<f64>,
    /// Member involved.
    pub member_id: Option<i64>,
    /// SEND or RECEIVE.
    pub remittance_type: Option<String>,
    /// Gateway-defined remittance reason.
    pub remittance_reason_type: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// A withdraw from a member wallet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    /// Withdraw identifier.
    pub id: Option<i64>,
    /// Creation time.
    pub created_date: Option<GatewayDateTime>,
    /// Record status.
    pub status: Option<Status>,
    /// Member whose balance was withdrawn.
    pub member_id: Option<i64>,
    /// Payout this withdraw was settled in.
    pub payout_id: Option<i64>,
    /// Withdraw amount.
    pub price: Option<f64>,
    /// Free-form description.
    pub description: Option<String>,
    /// Withdraw currency.
    pub currency: Option<Currency>,
    /// Payout progress.
    pub payout_status: Option<TransactionPayoutStatus>,
}

/// Result of refunding a wallet transaction back to a card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundWalletTransactionToCardResponse {
    /// Refund identifier.
    pub id: Option<i64>,
    /// Creation time.
    pub created_date: Option<GatewayDateTime>,
    /// Refund progress.
    pub refund_status: Option<String>,
    /// Refunded amount.
    pub refund_price: Option<f64>,
    /// Bank authorization code.
    pub auth_code: Option<String>,
    /// Bank host reference.
    pub host_reference: Option<String>,
    /// Bank transaction identifier.
    pub trans_id: Option<String>,
    /// Gateway transaction identifier.
    pub transaction_id: Option<i64>,
    /// Source wallet transaction.
    pub wallet_transaction_id: Option<i64>,
    /// Error details when the refund failed.
    pub payment_error: Option<PaymentError>,
    /// Source transaction type.
    pub transaction_type: Option<RefundCardTransactionType>,
}

/// A single wallet transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransactionResponse {
    /// Transaction identifier.
    pub id: Option<i64>,
    /// Creation time.
    pub created_date: Option<GatewayDateTime>,
    /// Transaction type.
    pub wallet_transaction_type: Option<String>,
    /// Transaction amount.
    pub amount: Option<f64>,
    /// Related payment transaction.
    pub transaction_id: Option<i64>,
    /// Wallet the transaction belongs to.
    pub wallet_id: Option<i64>,
}

/// Amount of a wallet transaction still refundable to card.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransactionRefundableAmountResponse {
    /// Refundable amount.
    pub refundable_amount: Option<f64>,
}

impl<'a> Wallet<'a> {
    pub(crate) fn new(client: &'a CraftgateClient) -> Self {
        Self { client }
    }

    /// Retrieves a member's wallet.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_member_wallet(&self, member_id: i64) -> Result<MemberWalletResponse, Error> {
        let request = self
            .client
            .request(Method::GET, &format!("/wallet/v1/members/{member_id}/wallet"))
            .build()?;
        self.client.send(request).await
    }

    /// Retrieves the merchant's own wallet.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_merchant_member_wallet(&self) -> Result<MemberWalletResponse, Error> {
        let request = self
            .client
            .request(Method::GET, "/wallet/v1/merchants/me/wallet")
            .build()?;
        self.client.send(request).await
    }

    /// Resets the merchant wallet balance. Only available on the sandbox.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn reset_merchant_member_wallet_balance(
        &self,
        request: &ResetMerchantMemberWalletBalanceRequest,
    ) -> Result<MemberWalletResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/wallet/v1/merchants/me/wallet/reset-balance")
            .json(request)
            .build()?;
        self.client.send(request).await
    }

    /// Lists transactions of a wallet, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn search_wallet_transactions(
        &self,
        request: &SearchWalletTransactionsRequest,
    ) -> Result<ListResponse<WalletTransactionResponse>, Error> {
        let request = self
            .client
            .request(
                Method::GET,
                &format!("/wallet/v1/wallets/{}/wallet-transactions", request.wallet_id),
            )
            .query(request)
            .build()?;
        self.client.send(request).await
    }

    /// Retrieves how much of a wallet transaction can still be refunded to card.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_refundable_amount_of_wallet_transaction(
        &self,
        wallet_transaction_id: i64,
    ) -> Result<WalletTransactionRefundableAmountResponse, Error> {
        let request = self
            .client
            .request(
                Method::GET,
                &format!("/payment/v1/wallet-transactions/{wallet_transaction_id}/refundable-amount"),
            )
            .build()?;
        self.client.send(request).await
    }

    /// Refunds a wallet transaction back to the originating card.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn refund_wallet_transaction_to_card(
        &self,
        request: &RefundWalletTransactionToCardRequest,
    ) -> Result<RefundWalletTransactionToCardResponse, Error> {
        let request = self
            .client
            .request(
                Method::POST,
                &format!(
                    "/payment/v1/wallet-transactions/{}/refunds",
                    request.wallet_transaction_id
                ),
            )
            .json(request)
            .build()?;
        self.client.send(request).await
    }

    /// Lists the card refunds of a wallet transaction.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_refund_wallet_transaction_to_card(
        &self,
        wallet_transaction_id: i64,
    ) -> Result<ListResponse<RefundWalletTransactionToCardResponse>, Error> {
        let request = self
            .client
            .request(
                Method::GET,
                &format!("/payment/v1/wallet-transactions/{wallet_transaction_id}/refunds"),
            )
            .build()?;
        self.client.send(request).await
    }

    /// Sends a remittance from the merchant wallet to a member wallet.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn send_remittance(
        &self,
        request: &RemittanceRequest,
    ) -> Result<RemittanceResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/wallet/v1/remittances/send")
            .json(request)
            .build()?;
        self.client.send(request).await
    }

    /// Collects a remittance from a member wallet into the merchant wallet.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn receive_remittance(
        &self,
        request: &RemittanceRequest,
    ) -> Result<RemittanceResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/wallet/v1/remittances/receive")
            .json(request)
            .build()?;
        self.client.send(request).await
    }

    /// Retrieves a remittance.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_remittance(&self, remittance_id: i64) -> Result<RemittanceResponse, Error> {
        let request = self
            .client
            .request(Method::GET, &format!("/wallet/v1/remittances/{remittance_id}"))
            .build()?;
        self.client.send(request).await
    }

    /// Creates a withdraw from a member wallet to the member's bank account.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn create_withdraw(
        &self,
        request: &CreateWithdrawRequest,
    ) -> Result<WithdrawResponse, Error> {
        let request = self
            .client
            .request(Method::POST, "/wallet/v1/withdraws")
            .json(request)
            .build()?;
        self.client.send(request).await
    }

    /// Cancels a withdraw that has not been paid out yet.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn cancel_withdraw(&self, withdraw_id: i64) -> Result<WithdrawResponse, Error> {
        let request = self
            .client
            .request(Method::POST, &format!("/wallet/v1/withdraws/{withdraw_id}/cancel"))
            .build()?;
        self.client.send(request).await
    }

    /// Retrieves a withdraw.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn retrieve_withdraw(&self, withdraw_id: i64) -> Result<WithdrawResponse, Error> {
        let request = self
            .client
            .request(Method::GET, &format!("/wallet/v1/withdraws/{withdraw_id}"))
            .build()?;
        self.client.send(request).await
    }

    /// Searches withdraws.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on transport failure, a gateway error envelope,
    /// or an undecodable response.
    pub async fn search_withdraws(
        &self,
        request: &SearchWithdrawsRequest,
    ) -> Result<ListResponse<WithdrawResponse>, Error> {
        let request = self
            .client
            .request(Method::GET, "/wallet/v1/withdraws")
            .query(request)
            .build()?;
        self.client.send(request).await
    }
}
