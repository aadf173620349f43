//! Proptest generators for property-based testing.

use proptest::prelude::*;

use oracle_ledger::OraclePayload;
use oracle_ledger_core::{
    CryptoScheme, Digest, Ed25519Scheme, PrivateKey, PublicKey, ReferenceScheme, Signature,
    Transaction,
};

/// Generate a reference-scheme private key (any non-empty byte string).
pub fn reference_key() -> impl Strategy<Value = PrivateKey> {
    prop::collection::vec(any::<u8>(), 1..=32).prop_map(PrivateKey::from_bytes)
}

/// Generate an Ed25519 seed.
pub fn ed25519_key() -> impl Strategy<Value = PrivateKey> {
    any::<[u8; 32]>().prop_map(PrivateKey::from)
}

/// Generate an Ed25519 public key.
pub fn ed25519_public_key() -> impl Strategy<Value = PublicKey> {
    ed25519_key().prop_map(|k| {
        Ed25519Scheme
            .derive_public_key(&k)
            .expect("32-byte seed is valid")
    })
}

/// Generate an arbitrary digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    prop::collection::vec(any::<u8>(), 1..=32).prop_map(Digest::from_bytes)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a `provide_data` integer report.
pub fn report() -> impl Strategy<Value = OraclePayload> {
    ("[a-z]{1,8}", "p[0-9]{1,2}", any::<i64>())
        .prop_map(|(key, provider, value)| OraclePayload::integer(key, provider, value))
}

/// Generate a roster size and cadence.
pub fn schedule_params() -> impl Strategy<Value = (usize, u64)> {
    (1usize..=16, 1u64..=64)
}

/// Parameters for generating a transaction.
#[derive(Debug, Clone)]
pub struct TxParams {
    pub key: PrivateKey,
    pub payload: Vec<u8>,
}

impl Arbitrary for TxParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (reference_key(), payload(256))
            .prop_map(|(key, payload)| TxParams { key, payload })
            .boxed()
    }
}

/// Sign a reference-scheme transaction from parameters.
pub fn tx_from_params(params: &TxParams) -> Transaction {
    Transaction::sign(&ReferenceScheme, &params.key, params.payload.clone())
        .expect("reference keys never fail")
}

/// Copy of `tx` with its digest replaced.
pub fn with_digest(tx: &Transaction, digest: Digest) -> Transaction {
    Transaction::from_parts(
        tx.sender.clone(),
        tx.payload.clone(),
        digest,
        tx.signature.clone(),
    )
}

/// Copy of `tx` with its signature replaced.
pub fn with_signature(tx: &Transaction, signature: Signature) -> Transaction {
    Transaction::from_parts(
        tx.sender.clone(),
        tx.payload.clone(),
        tx.digest.clone(),
        signature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_ledger_core::{validate_transaction, ValidationError};

    proptest! {
        #[test]
        fn test_signed_tx_validates(params: TxParams) {
            let tx = tx_from_params(&params);
            prop_assert_eq!(validate_transaction(&ReferenceScheme, &tx), Ok(()));
        }

        #[test]
        fn test_report_payload_decodes(payload in report()) {
            let bytes = payload.to_bytes().unwrap();
            prop_assert_eq!(OraclePayload::from_bytes(&bytes).unwrap(), payload);
        }

        #[test]
        fn test_forged_signature_rejected(params: TxParams, sig in digest()) {
            let tx = tx_from_params(&params);
            let forged = Signature::from_bytes(sig.0);
            prop_assume!(forged != tx.signature);

            prop_assert_eq!(
                validate_transaction(&ReferenceScheme, &with_signature(&tx, forged)),
                Err(ValidationError::BadSignature)
            );
        }
    }
}
