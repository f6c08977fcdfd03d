use serde::{Deserialize, Serialize};

use crate::balance::AccountBalance;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub address: String,
    pub display_address: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DisconnectResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct FundingResponse {
    pub balance: AccountBalance,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SendPaymentRequest {
    pub recipient: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct SendPaymentResponse {
    pub hash: String,
    pub recipient: String,
    pub amount: String,
    pub message: String,
}
