//! 加密钱包服务
//!
//! The KMS key wraps every data key issued under the wallet, so it is fixed
//! for the wallet's lifetime. Only the name can change in place.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{Wallet, WalletRequest};
use crate::validation::{require_non_empty, validate_arn};

const KIND: &str = "wallet";

/// 加密钱包服务
pub struct WalletService {
    ctx: Arc<ServiceContext>,
}

impl WalletService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    fn validate(request: &WalletRequest) -> CoreResult<()> {
        require_non_empty("name", &request.name)?;
        if let Some(arn) = &request.kms_key_arn {
            validate_arn("kms_key_arn", arn)?;
        }
        Ok(())
    }

    pub async fn create(&self, request: WalletRequest) -> CoreResult<Wallet> {
        Self::validate(&request)?;
        let wallet = self.ctx.wallets.create_wallet(&request).await?;
        log::info!("Created wallet {} ({})", wallet.id, wallet.name);
        Ok(wallet)
    }

    pub async fn read(&self, id: &str) -> CoreResult<Option<Wallet>> {
        found(self.ctx.wallets.get_wallet(id).await, KIND, id)
    }

    pub async fn update(&self, id: &str, request: WalletRequest) -> CoreResult<Wallet> {
        Self::validate(&request)?;

        let current = require_found(self.read(id).await?, KIND, id)?;
        if current.kms_key_arn != request.kms_key_arn {
            return Err(CoreError::validation(
                "kms_key_arn",
                "cannot change in place; the wallet must be replaced",
            ));
        }

        let wallet = self.ctx.wallets.update_wallet(id, &request).await?;
        log::info!("Updated wallet {id}");
        Ok(wallet)
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        if unless_gone(self.ctx.wallets.delete_wallet(id).await, KIND, id)?.is_some() {
            log::info!("Deleted wallet {id}");
        }
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<Wallet> {
        let wallet = self.read(id).await?;
        require_found(wallet, KIND, id)
    }
}
