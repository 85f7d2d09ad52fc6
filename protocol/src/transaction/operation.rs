//! Operations: the individual ledger changes a transaction carries.
//!
//! An [`Operation`] is an optional source-account override plus one
//! [`OperationBody`]. The body discriminants are fixed by the network:
//!
//! ```text
//!  0 CREATE_ACCOUNT        6 CHANGE_TRUST
//!  1 PAYMENT               7 ALLOW_TRUST
//!  2 PATH_PAYMENT          8 ACCOUNT_MERGE
//!  3 MANAGE_OFFER          9 INFLATION
//!  4 CREATE_PASSIVE_OFFER 10 MANAGE_DATA
//!  5 SET_OPTIONS
//! ```

use crate::config::{MAX_DATA_NAME, MAX_DATA_VALUE, MAX_HOME_DOMAIN, MAX_PATH_LENGTH};
use crate::xdr::{
    BoundedBytes, BoundedString, BoundedVec, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter,
};

use super::types::{
    Asset, Price, PublicKey, Signer, ASSET_TYPE_CREDIT_ALPHANUM12, ASSET_TYPE_CREDIT_ALPHANUM4,
};

/// Conversion path of a path payment: at most five intermediate assets.
pub type PaymentPath = BoundedVec<Asset, MAX_PATH_LENGTH>;

/// Home domain of an account, at most 32 bytes.
pub type HomeDomain = BoundedString<MAX_HOME_DOMAIN>;

/// Data entry name, at most 64 bytes.
pub type DataName = BoundedString<MAX_DATA_NAME>;

/// Data entry value, at most 64 bytes.
pub type DataValue = BoundedBytes<MAX_DATA_VALUE>;

/// Operation type discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPayment = 2,
    ManageOffer = 3,
    CreatePassiveOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
}

impl OperationType {
    pub fn discriminant(self) -> i32 {
        self as i32
    }
}

const CREATE_ACCOUNT: i32 = OperationType::CreateAccount as i32;
const PAYMENT: i32 = OperationType::Payment as i32;
const PATH_PAYMENT: i32 = OperationType::PathPayment as i32;
const MANAGE_OFFER: i32 = OperationType::ManageOffer as i32;
const CREATE_PASSIVE_OFFER: i32 = OperationType::CreatePassiveOffer as i32;
const SET_OPTIONS: i32 = OperationType::SetOptions as i32;
const CHANGE_TRUST: i32 = OperationType::ChangeTrust as i32;
const ALLOW_TRUST: i32 = OperationType::AllowTrust as i32;
const ACCOUNT_MERGE: i32 = OperationType::AccountMerge as i32;
const INFLATION: i32 = OperationType::Inflation as i32;
const MANAGE_DATA: i32 = OperationType::ManageData as i32;

// ---------------------------------------------------------------------------
// Operation bodies
// ---------------------------------------------------------------------------

/// Funds and creates a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountOp {
    pub destination: PublicKey,
    /// Stroops.
    pub starting_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: PublicKey,
    pub asset: Asset,
    /// Stroops.
    pub amount: i64,
}

/// Sends up to `send_max` of one asset so the destination receives exactly
/// `dest_amount` of another, converting through at most five hops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPaymentOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: PublicKey,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: PaymentPath,
}

/// Creates, updates or (with amount zero) deletes an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
    /// Zero creates a new offer.
    pub offer_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePassiveOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: i64,
    pub price: Price,
}

/// Account settings. Every field is optional and only present fields change.
///
/// On the wire each field is a zero-or-one element array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<PublicKey>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<HomeDomain>,
    pub signer: Option<Signer>,
}

/// Creates, updates or (with limit zero) removes a trust line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: Asset,
    pub limit: i64,
}

/// The asset code an issuer authorizes; the issuer is the operation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowTrustAsset {
    CreditAlphanum4([u8; 4]),
    CreditAlphanum12([u8; 12]),
}

/// Issuer-side authorization of a trust line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowTrustOp {
    pub trustor: PublicKey,
    pub asset: AllowTrustAsset,
    pub authorize: bool,
}

/// Sets, modifies or (with no value) deletes an account data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageDataOp {
    pub data_name: DataName,
    pub data_value: Option<DataValue>,
}

/// The operation payload, one arm per operation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPayment(PathPaymentOp),
    ManageOffer(ManageOfferOp),
    CreatePassiveOffer(CreatePassiveOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    /// Merges the source account into the destination.
    AccountMerge(PublicKey),
    Inflation,
    ManageData(ManageDataOp),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            OperationBody::CreateAccount(_) => OperationType::CreateAccount,
            OperationBody::Payment(_) => OperationType::Payment,
            OperationBody::PathPayment(_) => OperationType::PathPayment,
            OperationBody::ManageOffer(_) => OperationType::ManageOffer,
            OperationBody::CreatePassiveOffer(_) => OperationType::CreatePassiveOffer,
            OperationBody::SetOptions(_) => OperationType::SetOptions,
            OperationBody::ChangeTrust(_) => OperationType::ChangeTrust,
            OperationBody::AllowTrust(_) => OperationType::AllowTrust,
            OperationBody::AccountMerge(_) => OperationType::AccountMerge,
            OperationBody::Inflation => OperationType::Inflation,
            OperationBody::ManageData(_) => OperationType::ManageData,
        }
    }
}

/// A single operation. Without a source account it acts on the
/// transaction's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<PublicKey>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: PublicKey) -> Self {
        self.source_account = Some(source);
        self
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

impl XdrEncode for CreateAccountOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.destination.encode(w);
        w.write_i64(self.starting_balance);
    }
}

impl XdrEncode for PaymentOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.destination.encode(w);
        self.asset.encode(w);
        w.write_i64(self.amount);
    }
}

impl XdrEncode for PathPaymentOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.send_asset.encode(w);
        w.write_i64(self.send_max);
        self.destination.encode(w);
        self.dest_asset.encode(w);
        w.write_i64(self.dest_amount);
        self.path.encode(w);
    }
}

impl XdrEncode for ManageOfferOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.selling.encode(w);
        self.buying.encode(w);
        w.write_i64(self.amount);
        self.price.encode(w);
        w.write_u64(self.offer_id);
    }
}

impl XdrEncode for CreatePassiveOfferOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.selling.encode(w);
        self.buying.encode(w);
        w.write_i64(self.amount);
        self.price.encode(w);
    }
}

impl XdrEncode for SetOptionsOp {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_optional_as_array(self.inflation_dest.as_ref());
        w.write_optional_as_array(self.clear_flags.as_ref());
        w.write_optional_as_array(self.set_flags.as_ref());
        w.write_optional_as_array(self.master_weight.as_ref());
        w.write_optional_as_array(self.low_threshold.as_ref());
        w.write_optional_as_array(self.med_threshold.as_ref());
        w.write_optional_as_array(self.high_threshold.as_ref());
        w.write_optional_as_array(self.home_domain.as_ref());
        w.write_optional_as_array(self.signer.as_ref());
    }
}

impl XdrEncode for ChangeTrustOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.line.encode(w);
        w.write_i64(self.limit);
    }
}

impl XdrEncode for AllowTrustAsset {
    fn encode(&self, w: &mut XdrWriter) {
        match self {
            AllowTrustAsset::CreditAlphanum4(code) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM4);
                w.write_fixed_opaque(code);
            }
            AllowTrustAsset::CreditAlphanum12(code) => {
                w.write_discriminant(ASSET_TYPE_CREDIT_ALPHANUM12);
                w.write_fixed_opaque(code);
            }
        }
    }
}

impl XdrEncode for AllowTrustOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.trustor.encode(w);
        self.asset.encode(w);
        w.write_bool(self.authorize);
    }
}

impl XdrEncode for ManageDataOp {
    fn encode(&self, w: &mut XdrWriter) {
        self.data_name.encode(w);
        w.write_optional(self.data_value.as_ref());
    }
}

impl XdrEncode for OperationBody {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_discriminant(self.operation_type().discriminant());
        match self {
            OperationBody::CreateAccount(op) => op.encode(w),
            OperationBody::Payment(op) => op.encode(w),
            OperationBody::PathPayment(op) => op.encode(w),
            OperationBody::ManageOffer(op) => op.encode(w),
            OperationBody::CreatePassiveOffer(op) => op.encode(w),
            OperationBody::SetOptions(op) => op.encode(w),
            OperationBody::ChangeTrust(op) => op.encode(w),
            OperationBody::AllowTrust(op) => op.encode(w),
            OperationBody::AccountMerge(destination) => destination.encode(w),
            OperationBody::Inflation => {}
            OperationBody::ManageData(op) => op.encode(w),
        }
    }
}

impl XdrEncode for Operation {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_optional(self.source_account.as_ref());
        self.body.encode(w);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl XdrDecode for CreateAccountOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: PublicKey::decode(r)?,
            starting_balance: r.read_i64()?,
        })
    }
}

impl XdrDecode for PaymentOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: PublicKey::decode(r)?,
            asset: Asset::decode(r)?,
            amount: r.read_i64()?,
        })
    }
}

impl XdrDecode for PathPaymentOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            send_asset: Asset::decode(r)?,
            send_max: r.read_i64()?,
            destination: PublicKey::decode(r)?,
            dest_asset: Asset::decode(r)?,
            dest_amount: r.read_i64()?,
            path: PaymentPath::decode(r)?,
        })
    }
}

impl XdrDecode for ManageOfferOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            selling: Asset::decode(r)?,
            buying: Asset::decode(r)?,
            amount: r.read_i64()?,
            price: Price::decode(r)?,
            offer_id: r.read_u64()?,
        })
    }
}

impl XdrDecode for CreatePassiveOfferOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            selling: Asset::decode(r)?,
            buying: Asset::decode(r)?,
            amount: r.read_i64()?,
            price: Price::decode(r)?,
        })
    }
}

impl XdrDecode for SetOptionsOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            inflation_dest: r.read_optional_as_array()?,
            clear_flags: r.read_optional_as_array()?,
            set_flags: r.read_optional_as_array()?,
            master_weight: r.read_optional_as_array()?,
            low_threshold: r.read_optional_as_array()?,
            med_threshold: r.read_optional_as_array()?,
            high_threshold: r.read_optional_as_array()?,
            home_domain: r.read_optional_as_array()?,
            signer: r.read_optional_as_array()?,
        })
    }
}

impl XdrDecode for ChangeTrustOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            line: Asset::decode(r)?,
            limit: r.read_i64()?,
        })
    }
}

impl XdrDecode for AllowTrustAsset {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_discriminant()? {
            ASSET_TYPE_CREDIT_ALPHANUM4 => {
                Ok(AllowTrustAsset::CreditAlphanum4(r.read_fixed_opaque()?))
            }
            ASSET_TYPE_CREDIT_ALPHANUM12 => {
                Ok(AllowTrustAsset::CreditAlphanum12(r.read_fixed_opaque()?))
            }
            other => Err(r.unknown_variant("AllowTrustAsset", other)),
        }
    }
}

impl XdrDecode for AllowTrustOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            trustor: PublicKey::decode(r)?,
            asset: AllowTrustAsset::decode(r)?,
            authorize: r.read_bool()?,
        })
    }
}

impl XdrDecode for ManageDataOp {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            data_name: DataName::decode(r)?,
            data_value: r.read_optional()?,
        })
    }
}

impl XdrDecode for OperationBody {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let body = match r.read_discriminant()? {
            CREATE_ACCOUNT => OperationBody::CreateAccount(CreateAccountOp::decode(r)?),
            PAYMENT => OperationBody::Payment(PaymentOp::decode(r)?),
            PATH_PAYMENT => OperationBody::PathPayment(PathPaymentOp::decode(r)?),
            MANAGE_OFFER => OperationBody::ManageOffer(ManageOfferOp::decode(r)?),
            CREATE_PASSIVE_OFFER => {
                OperationBody::CreatePassiveOffer(CreatePassiveOfferOp::decode(r)?)
            }
            SET_OPTIONS => OperationBody::SetOptions(SetOptionsOp::decode(r)?),
            CHANGE_TRUST => OperationBody::ChangeTrust(ChangeTrustOp::decode(r)?),
            ALLOW_TRUST => OperationBody::AllowTrust(AllowTrustOp::decode(r)?),
            ACCOUNT_MERGE => OperationBody::AccountMerge(PublicKey::decode(r)?),
            INFLATION => OperationBody::Inflation,
            MANAGE_DATA => OperationBody::ManageData(ManageDataOp::decode(r)?),
            other => return Err(r.unknown_variant("OperationType", other)),
        };
        Ok(body)
    }
}

impl XdrDecode for Operation {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: r.read_optional()?,
            body: OperationBody::decode(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::types::SignerKey;

    fn key(byte: u8) -> PublicKey {
        PublicKey::Ed25519([byte; 32])
    }

    fn usd() -> Asset {
        Asset::credit("USD", key(9)).unwrap()
    }

    fn one_of_each() -> Vec<OperationBody> {
        vec![
            OperationBody::CreateAccount(CreateAccountOp {
                destination: key(1),
                starting_balance: 20_000_000,
            }),
            OperationBody::Payment(PaymentOp {
                destination: key(2),
                asset: Asset::Native,
                amount: 100,
            }),
            OperationBody::PathPayment(PathPaymentOp {
                send_asset: Asset::Native,
                send_max: 500,
                destination: key(3),
                dest_asset: usd(),
                dest_amount: 400,
                path: vec![Asset::credit("EUR", key(4)).unwrap()].try_into().unwrap(),
            }),
            OperationBody::ManageOffer(ManageOfferOp {
                selling: Asset::Native,
                buying: usd(),
                amount: 1_000,
                price: Price::new(1, 2),
                offer_id: 0,
            }),
            OperationBody::CreatePassiveOffer(CreatePassiveOfferOp {
                selling: usd(),
                buying: Asset::Native,
                amount: 10,
                price: Price::new(2, 1),
            }),
            OperationBody::SetOptions(SetOptionsOp {
                home_domain: Some("example.com".parse().unwrap()),
                master_weight: Some(1),
                signer: Some(Signer {
                    key: SignerKey::Ed25519([5; 32]),
                    weight: 1,
                }),
                ..Default::default()
            }),
            OperationBody::ChangeTrust(ChangeTrustOp {
                line: usd(),
                limit: i64::MAX,
            }),
            OperationBody::AllowTrust(AllowTrustOp {
                trustor: key(6),
                asset: AllowTrustAsset::CreditAlphanum4(*b"USD\0"),
                authorize: true,
            }),
            OperationBody::AccountMerge(key(7)),
            OperationBody::Inflation,
            OperationBody::ManageData(ManageDataOp {
                data_name: "config".parse().unwrap(),
                data_value: Some(vec![1u8, 2, 3].try_into().unwrap()),
            }),
        ]
    }

    #[test]
    fn body_emits_its_discriminant() {
        let expected = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        for (body, want) in one_of_each().into_iter().zip(expected) {
            let bytes = body.to_xdr();
            assert_eq!(i32::from_be_bytes(bytes[..4].try_into().unwrap()), want);
            assert_eq!(OperationBody::from_xdr(&bytes).unwrap(), body);
        }
    }

    #[test]
    fn decode_arms_agree_with_operation_type() {
        for body in one_of_each() {
            let kind = body.operation_type();
            let decoded = OperationBody::from_xdr(&body.to_xdr()).unwrap();
            assert_eq!(decoded.operation_type(), kind);
            assert_eq!(decoded.operation_type().discriminant(), kind as i32);
        }
        assert_eq!(INFLATION, 9);
        assert_eq!(MANAGE_DATA, 10);
    }

    #[test]
    fn unknown_operation_type_is_rejected() {
        for discriminant in [11i32, -1, 255] {
            let bytes = discriminant.to_be_bytes();
            match OperationBody::from_xdr(&bytes) {
                Err(XdrError::UnknownVariant {
                    union: "OperationType",
                    discriminant: d,
                    ..
                }) => assert_eq!(d, discriminant),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn payment_wire_format() {
        let op = Operation::new(OperationBody::Payment(PaymentOp {
            destination: key(2),
            asset: Asset::Native,
            amount: 100,
        }));
        let mut expected = String::new();
        expected.push_str("00000000"); // no source account
        expected.push_str("00000001"); // PAYMENT
        expected.push_str("00000000"); // ed25519
        expected.push_str(&"02".repeat(32));
        expected.push_str("00000000"); // native
        expected.push_str("0000000000000064");
        assert_eq!(hex::encode(op.to_xdr()), expected);
    }

    #[test]
    fn source_account_override_round_trips() {
        let op = Operation::new(OperationBody::Inflation).with_source(key(8));
        let bytes = op.to_xdr();
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn empty_set_options_is_nine_zero_counts() {
        let bytes = SetOptionsOp::default().to_xdr();
        assert_eq!(bytes, vec![0u8; 36]);
    }

    #[test]
    fn set_options_field_with_two_elements_is_rejected() {
        let mut bytes = SetOptionsOp::default().to_xdr();
        // clear_flags: count 2 followed by two values
        bytes.splice(4..8, [0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert!(matches!(
            SetOptionsOp::from_xdr(&bytes),
            Err(XdrError::LengthMismatch {
                declared: 2,
                allowed: 1,
                ..
            })
        ));
    }

    #[test]
    fn set_options_home_domain_bound() {
        assert_eq!(
            HomeDomain::try_from("a".repeat(33)),
            Err(XdrError::TooLong { len: 33, max: 32 })
        );

        let op = SetOptionsOp {
            home_domain: Some(HomeDomain::try_from("a".repeat(32)).unwrap()),
            ..Default::default()
        };
        assert_eq!(SetOptionsOp::from_xdr(&op.to_xdr()).unwrap(), op);

        // a 33-byte domain written by hand
        let mut bytes = SetOptionsOp::default().to_xdr();
        let mut domain = vec![0, 0, 0, 1, 0, 0, 0, 33];
        domain.extend_from_slice(&[b'a'; 33]);
        domain.extend_from_slice(&[0; 3]);
        bytes.splice(28..32, domain);
        assert!(matches!(
            SetOptionsOp::from_xdr(&bytes),
            Err(XdrError::LengthMismatch { allowed: 32, .. })
        ));
    }

    #[test]
    fn allow_trust_rejects_native_code() {
        let mut bytes = AllowTrustOp {
            trustor: key(1),
            asset: AllowTrustAsset::CreditAlphanum4(*b"USD\0"),
            authorize: false,
        }
        .to_xdr();
        bytes[36..40].copy_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(
            AllowTrustOp::from_xdr(&bytes),
            Err(XdrError::UnknownVariant {
                union: "AllowTrustAsset",
                ..
            })
        ));
    }

    #[test]
    fn manage_data_delete_has_no_value() {
        let op = ManageDataOp {
            data_name: "k".parse().unwrap(),
            data_value: None,
        };
        assert_eq!(hex::encode(op.to_xdr()), "000000016b00000000000000");
    }

    #[test]
    fn path_longer_than_five_is_rejected() {
        assert_eq!(
            PaymentPath::try_from(vec![Asset::Native; 6]),
            Err(XdrError::TooLong { len: 6, max: 5 })
        );

        let op = PathPaymentOp {
            send_asset: Asset::Native,
            send_max: 1,
            destination: key(1),
            dest_asset: Asset::Native,
            dest_amount: 1,
            path: PaymentPath::try_from(vec![Asset::Native; 5]).unwrap(),
        };
        let mut bytes = op.to_xdr();
        // bump the trailing path count to six and append a sixth native asset
        let count_at = bytes.len() - 4 * 6;
        bytes[count_at + 3] = 6;
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(
            PathPaymentOp::from_xdr(&bytes),
            Err(XdrError::LengthMismatch { allowed: 5, .. })
        ));
    }

    #[test]
    fn manage_data_bounds_hold_at_construction() {
        assert_eq!(
            DataName::try_from("n".repeat(65)),
            Err(XdrError::TooLong { len: 65, max: 64 })
        );
        assert_eq!(
            DataValue::try_from(vec![0u8; 65]),
            Err(XdrError::TooLong { len: 65, max: 64 })
        );
    }
}
