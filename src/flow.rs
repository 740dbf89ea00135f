//! The end-to-end creation flow.
//!
//! Orchestrates the collaborators: validate the form, upload the image with
//! bounded retry, assemble the transaction, obtain the wallet signature,
//! submit, confirm, and run the post-creation validator. At most one creation
//! runs at a time; a second call fails fast and spawns nothing.

use std::cell::Cell;

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::assemble::assemble;
use crate::config::MinterConfig;
use crate::error::{FormError, MinterError, WalletError};
use crate::metadata::TokenMetadata;
use crate::network::ChainEndpoint;
use crate::progress::{NullSink, Progress, ProgressSink};
use crate::request::{RevokeFlags, TokenForm};
use crate::submit::submit_and_confirm;
use crate::transaction::{Transaction, TransactionExt};
use crate::upload::{upload_with_retry, ImageFile, ImageStore, Sleeper};
use crate::validate::{StubValidator, TokenValidator, ValidationReport};
use crate::wallet::WalletProvider;

/// Summary of the created token for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub supply: u64,
}

/// A confirmed creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedToken {
    pub mint_address: String,
    pub signature: String,
    /// Wallet address that paid for and owns the initial supply.
    pub owner: String,
    pub metadata: TokenSummary,
    pub image_url: String,
    pub metadata_uri: String,
    pub service_fee_lamports: u64,
    pub explorer_url: String,
    pub revoke: RevokeFlags,
}

/// Creation result plus the post-creation validation report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationOutcome {
    pub token: CreatedToken,
    pub validation: ValidationReport,
}

/// Clears the in-flight flag on every exit path, including cancellation.
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    fn arm(flag: &'a Cell<bool>) -> InFlightGuard<'a> {
        flag.set(true);
        InFlightGuard { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Top-level creation flow over injected collaborators.
pub struct TokenCreator {
    wallet: Box<dyn WalletProvider>,
    endpoint: Box<dyn ChainEndpoint>,
    uploader: Box<dyn ImageStore>,
    sleeper: Box<dyn Sleeper>,
    validator: Box<dyn TokenValidator>,
    sink: Box<dyn ProgressSink>,
    config: MinterConfig,
    in_flight: Cell<bool>,
}

impl TokenCreator {
    pub fn new(
        wallet: Box<dyn WalletProvider>,
        endpoint: Box<dyn ChainEndpoint>,
        uploader: Box<dyn ImageStore>,
        sleeper: Box<dyn Sleeper>,
        config: MinterConfig,
    ) -> TokenCreator {
        TokenCreator {
            wallet,
            endpoint,
            uploader,
            sleeper,
            validator: Box::new(StubValidator),
            sink: Box::new(NullSink),
            config,
            in_flight: Cell::new(false),
        }
    }

    /// Replace the post-creation validator.
    pub fn with_validator(mut self, validator: Box<dyn TokenValidator>) -> TokenCreator {
        self.validator = validator;
        self
    }

    /// Attach a progress sink for the host's notification layer.
    pub fn with_progress(mut self, sink: Box<dyn ProgressSink>) -> TokenCreator {
        self.sink = sink;
        self
    }

    /// Whether a creation is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Run the whole creation flow.
    ///
    /// Rejects immediately, before touching any collaborator, when another
    /// creation is pending. Nothing is retried on failure; the user
    /// re-triggers the flow, which reassembles with a fresh blockhash.
    pub async fn create(
        &self,
        form: &TokenForm,
        image: ImageFile,
    ) -> Result<CreationOutcome, MinterError> {
        if self.in_flight.get() {
            return Err(MinterError::AlreadyInFlight);
        }
        let _guard = InFlightGuard::arm(&self.in_flight);

        if !self.wallet.is_connected() {
            return Err(WalletError::Disconnected.into());
        }
        let owner = self
            .wallet
            .public_key()
            .ok_or(WalletError::Disconnected)?;
        let payer: Pubkey = owner
            .parse()
            .map_err(|_| MinterError::Codec(format!("invalid wallet address: {}", owner)))?;

        let mut request = form.validate()?;
        if image.bytes.is_empty() {
            return Err(FormError::ImageRequired.into());
        }

        self.sink.progress(Progress::UploadingImage);
        let image_url =
            upload_with_retry(self.uploader.as_ref(), self.sleeper.as_ref(), &image).await?;
        request.image_url = image_url.clone();
        self.sink.progress(Progress::ImageUploaded);

        let metadata_uri =
            TokenMetadata::from_request(&request, &image.content_type).to_data_uri()?;

        self.sink.progress(Progress::BuildingTransaction);
        let fee_wallet = self.config.fee_wallet_pubkey()?;
        let assembled =
            assemble(self.endpoint.as_ref(), &request, &payer, &fee_wallet).await?;

        self.sink.progress(Progress::AwaitingSignature);
        let unsigned_bytes = assembled.transaction.to_bytes()?;
        let signed_bytes = self.wallet.sign_transaction(&unsigned_bytes).await?;
        let signed = Transaction::from_bytes(&signed_bytes)?;
        if !signed.is_fully_signed() {
            return Err(WalletError::Other(
                "wallet returned an incompletely signed transaction".to_string(),
            )
            .into());
        }

        self.sink.progress(Progress::Submitting);
        let signature = submit_and_confirm(self.endpoint.as_ref(), &signed).await?;
        self.sink.progress(Progress::Confirmed);

        let token = CreatedToken {
            mint_address: assembled.mint_address,
            signature: signature.clone(),
            owner,
            metadata: TokenSummary {
                name: request.name.clone(),
                symbol: request.symbol.clone(),
                decimals: request.decimals,
                supply: request.supply,
            },
            image_url,
            metadata_uri,
            service_fee_lamports: assembled.fee.lamports(),
            explorer_url: self.config.explorer_tx_url(&signature),
            revoke: request.revoke,
        };

        let validation = self.validator.validate(&token).await;
        Ok(CreationOutcome { token, validation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EndpointError, UploadError};
    use crate::keypair::{Keypair, KeypairExt};
    use crate::network::TransactionStatus;
    use crate::validate::ValidationStatus;
    use async_trait::async_trait;
    use futures::FutureExt;
    use solana_sdk::hash::Hash;
    use solana_signer::Signer;
    use std::cell::RefCell;
    use std::future::Future;
    use std::rc::Rc;
    use std::task::Context;
    use std::time::Duration;

    const BLOCKHASH: &str = "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4";
    const SIGNATURE: &str = "2id3YC2jK9G5Wo2phDx4gJVAew8DcY5NAojnVuao8rkxwPYPe8cSwE5GzhEgJA2y8fVjDEo6iR6ykBvDxrTQrtpb";

    struct MockWallet {
        keypair: Keypair,
        connected: bool,
        reject: bool,
    }

    impl MockWallet {
        fn connected() -> MockWallet {
            MockWallet {
                keypair: Keypair::new(),
                connected: true,
                reject: false,
            }
        }
    }

    #[async_trait(?Send)]
    impl WalletProvider for MockWallet {
        fn is_connected(&self) -> bool {
            self.connected
        }

        fn public_key(&self) -> Option<String> {
            self.connected.then(|| self.keypair.address())
        }

        async fn sign_transaction(&self, transaction: &[u8]) -> Result<Vec<u8>, WalletError> {
            if self.reject {
                return Err(WalletError::Rejected);
            }
            let mut tx = Transaction::from_bytes(transaction)
                .map_err(|e| WalletError::Other(e.to_string()))?;
            let signature = self.keypair.sign_message(&tx.message.serialize());
            tx.add_signature(&self.keypair.address(), signature.as_ref())
                .map_err(|e| WalletError::Other(e.to_string()))?;
            tx.to_bytes().map_err(|e| WalletError::Other(e.to_string()))
        }
    }

    #[derive(Default)]
    struct MockEndpoint {
        confirm_err: Option<String>,
        sends: RefCell<u32>,
        rent_lookups: RefCell<u32>,
    }

    #[async_trait(?Send)]
    impl ChainEndpoint for MockEndpoint {
        async fn minimum_balance_for_rent_exemption(
            &self,
            _space: u64,
        ) -> Result<u64, EndpointError> {
            *self.rent_lookups.borrow_mut() += 1;
            Ok(1_461_600)
        }

        async fn latest_blockhash(&self) -> Result<Hash, EndpointError> {
            Ok(BLOCKHASH.parse().unwrap())
        }

        async fn send_transaction(&self, transaction: &[u8]) -> Result<String, EndpointError> {
            let tx = Transaction::from_bytes(transaction)
                .map_err(|e| EndpointError::Send(e.to_string()))?;
            if !tx.is_fully_signed() {
                return Err(EndpointError::Send("missing signatures".to_string()));
            }
            *self.sends.borrow_mut() += 1;
            Ok(SIGNATURE.to_string())
        }

        async fn confirm_transaction(
            &self,
            _signature: &str,
        ) -> Result<TransactionStatus, EndpointError> {
            Ok(TransactionStatus {
                err: self.confirm_err.clone(),
            })
        }
    }

    /// Endpoint whose first lookup never resolves; used to park a creation
    /// mid-flight.
    struct StalledEndpoint;

    #[async_trait(?Send)]
    impl ChainEndpoint for StalledEndpoint {
        async fn minimum_balance_for_rent_exemption(
            &self,
            _space: u64,
        ) -> Result<u64, EndpointError> {
            std::future::pending::<()>().await;
            unreachable!()
        }

        async fn latest_blockhash(&self) -> Result<Hash, EndpointError> {
            Ok(BLOCKHASH.parse().unwrap())
        }

        async fn send_transaction(&self, _transaction: &[u8]) -> Result<String, EndpointError> {
            Ok(SIGNATURE.to_string())
        }

        async fn confirm_transaction(
            &self,
            _signature: &str,
        ) -> Result<TransactionStatus, EndpointError> {
            Ok(TransactionStatus::ok())
        }
    }

    #[derive(Default)]
    struct MockStore {
        uploads: Rc<RefCell<u32>>,
    }

    #[async_trait(?Send)]
    impl ImageStore for MockStore {
        async fn upload(&self, _image: &ImageFile) -> Result<String, UploadError> {
            *self.uploads.borrow_mut() += 1;
            Ok("https://storage.example/demo.png".to_string())
        }
    }

    struct NoopSleeper;

    #[async_trait(?Send)]
    impl Sleeper for NoopSleeper {
        async fn sleep(&self, _delay: Duration) {}
    }

    fn demo_form() -> TokenForm {
        TokenForm {
            name: "Demo".to_string(),
            symbol: "DMO".to_string(),
            decimals: 6,
            supply: "1000000".to_string(),
            description: String::new(),
            revoke: RevokeFlags {
                mint: true,
                ..RevokeFlags::default()
            },
        }
    }

    fn demo_image() -> ImageFile {
        ImageFile {
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            content_type: "image/png".to_string(),
        }
    }

    fn creator_with(wallet: MockWallet, endpoint: Box<dyn ChainEndpoint>) -> TokenCreator {
        TokenCreator::new(
            Box::new(wallet),
            endpoint,
            Box::new(MockStore::default()),
            Box::new(NoopSleeper),
            MinterConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_creation() {
        let creator = creator_with(MockWallet::connected(), Box::new(MockEndpoint::default()));

        let outcome = creator.create(&demo_form(), demo_image()).await.unwrap();

        assert!(!outcome.token.mint_address.is_empty());
        assert_eq!(outcome.token.signature, SIGNATURE);
        assert_eq!(outcome.token.service_fee_lamports, 150_000_000);
        assert_eq!(outcome.token.metadata.symbol, "DMO");
        assert_eq!(outcome.token.metadata.supply, 1_000_000);
        assert!(outcome
            .token
            .metadata_uri
            .starts_with("data:application/json;base64,"));
        assert!(outcome.token.explorer_url.contains(SIGNATURE));
        assert_eq!(outcome.validation.status, ValidationStatus::Perfect);
        assert_eq!(outcome.validation.authorities.mint_authority, None);
        assert!(!creator.is_in_flight());
    }

    #[tokio::test]
    async fn test_wallet_rejection_produces_no_submission() {
        let endpoint = MockEndpoint::default();
        let sends = Rc::new(RefCell::new(0u32));
        // The endpoint is moved into the creator; count sends via a wrapper.
        struct CountingEndpoint {
            inner: MockEndpoint,
            sends: Rc<RefCell<u32>>,
        }

        #[async_trait(?Send)]
        impl ChainEndpoint for CountingEndpoint {
            async fn minimum_balance_for_rent_exemption(
                &self,
                space: u64,
            ) -> Result<u64, EndpointError> {
                self.inner.minimum_balance_for_rent_exemption(space).await
            }

            async fn latest_blockhash(&self) -> Result<Hash, EndpointError> {
                self.inner.latest_blockhash().await
            }

            async fn send_transaction(
                &self,
                transaction: &[u8],
            ) -> Result<String, EndpointError> {
                *self.sends.borrow_mut() += 1;
                self.inner.send_transaction(transaction).await
            }

            async fn confirm_transaction(
                &self,
                signature: &str,
            ) -> Result<TransactionStatus, EndpointError> {
                self.inner.confirm_transaction(signature).await
            }
        }

        let mut wallet = MockWallet::connected();
        wallet.reject = true;
        let creator = creator_with(
            wallet,
            Box::new(CountingEndpoint {
                inner: endpoint,
                sends: Rc::clone(&sends),
            }),
        );

        let err = creator.create(&demo_form(), demo_image()).await.unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(*sends.borrow(), 0);
        assert!(!creator.is_in_flight());
    }

    #[tokio::test]
    async fn test_disconnected_wallet_is_rejected_before_upload() {
        let mut wallet = MockWallet::connected();
        wallet.connected = false;
        let uploads = Rc::new(RefCell::new(0u32));
        let creator = TokenCreator::new(
            Box::new(wallet),
            Box::new(MockEndpoint::default()),
            Box::new(MockStore {
                uploads: Rc::clone(&uploads),
            }),
            Box::new(NoopSleeper),
            MinterConfig::default(),
        );

        let err = creator.create(&demo_form(), demo_image()).await.unwrap_err();
        assert_eq!(err, MinterError::Wallet(WalletError::Disconnected));
        assert_eq!(*uploads.borrow(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_touches_no_collaborator() {
        let uploads = Rc::new(RefCell::new(0u32));
        let creator = TokenCreator::new(
            Box::new(MockWallet::connected()),
            Box::new(MockEndpoint::default()),
            Box::new(MockStore {
                uploads: Rc::clone(&uploads),
            }),
            Box::new(NoopSleeper),
            MinterConfig::default(),
        );

        let mut form = demo_form();
        form.supply = "-1".to_string();
        let err = creator.create(&form, demo_image()).await.unwrap_err();
        assert_eq!(err, MinterError::Form(FormError::InvalidSupply));
        assert_eq!(*uploads.borrow(), 0);
    }

    #[tokio::test]
    async fn test_missing_image_is_rejected() {
        let creator = creator_with(MockWallet::connected(), Box::new(MockEndpoint::default()));
        let empty = ImageFile {
            bytes: Vec::new(),
            content_type: "image/png".to_string(),
        };
        let err = creator.create(&demo_form(), empty).await.unwrap_err();
        assert_eq!(err, MinterError::Form(FormError::ImageRequired));
    }

    #[tokio::test]
    async fn test_confirmed_failure_surfaces_signature() {
        let endpoint = MockEndpoint {
            confirm_err: Some("InstructionError(0, Custom(1))".to_string()),
            ..MockEndpoint::default()
        };
        let creator = creator_with(MockWallet::connected(), Box::new(endpoint));
        let err = creator.create(&demo_form(), demo_image()).await.unwrap_err();
        assert!(matches!(err, MinterError::TransactionFailed { .. }));
        assert!(!creator.is_in_flight());
    }

    #[test]
    fn test_second_create_while_pending_is_rejected() {
        let creator = creator_with(MockWallet::connected(), Box::new(StalledEndpoint));
        let form = demo_form();

        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);

        // Park the first creation at the rent lookup.
        let mut first = Box::pin(creator.create(&form, demo_image()));
        assert!(first.as_mut().poll(&mut cx).is_pending());
        assert!(creator.is_in_flight());

        // A second call is rejected synchronously, spawning nothing.
        let second = creator.create(&form, demo_image()).now_or_never();
        match second {
            Some(Err(MinterError::AlreadyInFlight)) => {}
            other => panic!("expected AlreadyInFlight, got {:?}", other),
        }

        // Cancelling the first creation clears the flag.
        drop(first);
        assert!(!creator.is_in_flight());

        // And a new creation may start again.
        let mut third = Box::pin(creator.create(&form, demo_image()));
        assert!(third.as_mut().poll(&mut cx).is_pending());
        assert!(creator.is_in_flight());
    }
}
