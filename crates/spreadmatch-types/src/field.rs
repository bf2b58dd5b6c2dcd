//! Prime field used for masks, masked factors and outcome shares.
//!
//! All protocol arithmetic happens modulo the 128-bit safe prime
//! [`MODULUS`]. The modulus is far larger than any aggregate the spread
//! protocol ever reconstructs (the per-slot outcome is `-1` or `0`), so a
//! summed outcome can be lifted back to a small integer without wraparound.
//!
//! The arithmetic itself is delegated to `ark-ff` (Montgomery backend,
//! two 64-bit limbs).

use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use ark_ff::fields::{Fp128, MontBackend, MontConfig};
use ark_ff::{BigInt, Field, One, PrimeField, Zero};
use rand::Rng;
use rand::distributions::Standard;
use serde::{Deserialize, Serialize};

use crate::SpreadmatchError;

/// The field modulus `p = 2^128 - 15449`, a safe prime (`(p - 1) / 2` is prime).
pub const MODULUS: u128 = 0xffff_ffff_ffff_ffff_ffff_ffff_ffff_c3a7;

#[derive(MontConfig)]
#[modulus = "340282366920938463463374607431768196007"]
#[generator = "5"]
pub struct FieldConfig;

type Fp = Fp128<MontBackend<FieldConfig, 2>>;

/// An element of the prime field `GF(p)`.
///
/// Serialized as 32 lowercase hex digits (big-endian canonical value).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FieldElement(Fp);

impl FieldElement {
    #[must_use]
    pub fn zero() -> Self {
        Self(Fp::zero())
    }

    #[must_use]
    pub fn one() -> Self {
        Self(Fp::one())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(Fp::from(value))
    }

    /// Embed a signed integer: negative values map to `p - |value|`.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        let magnitude = Self::from_u64(value.unsigned_abs());
        if value < 0 { -magnitude } else { magnitude }
    }

    /// Build an element from its canonical representative.
    ///
    /// Returns `None` if `value >= MODULUS`.
    #[must_use]
    pub fn from_canonical(value: u128) -> Option<Self> {
        let lo = value as u64;
        let hi = (value >> 64) as u64;
        Fp::from_bigint(BigInt::new([lo, hi])).map(Self)
    }

    /// The canonical representative in `[0, MODULUS)`.
    #[must_use]
    pub fn to_canonical(&self) -> u128 {
        let limbs = self.0.into_bigint().0;
        (u128::from(limbs[1]) << 64) | u128::from(limbs[0])
    }

    /// Lift to a small non-negative integer, if the canonical value fits in `u64`.
    #[must_use]
    pub fn to_small(&self) -> Option<u64> {
        u64::try_from(self.to_canonical()).ok()
    }

    /// Multiplicative inverse; `None` for zero.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Self)
    }

    /// Uniformly random element.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate: u128 = rng.sample(Standard);
            if let Some(element) = Self::from_canonical(candidate) {
                return element;
            }
        }
    }

    /// Uniformly random non-zero element (used for multiplicative masks).
    pub fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }

    /// Little-endian bytes of the canonical value, for hashing.
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; 16] {
        self.to_canonical().to_le_bytes()
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_canonical())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical())
    }
}

impl From<FieldElement> for String {
    fn from(value: FieldElement) -> Self {
        hex::encode(value.to_canonical().to_be_bytes())
    }
}

impl TryFrom<String> for FieldElement {
    type Error = SpreadmatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let bytes = hex::decode(&value)
            .map_err(|e| SpreadmatchError::Serialization(format!("field element hex: {e}")))?;
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| {
            SpreadmatchError::Serialization(format!(
                "field element must be 16 bytes, got {value:?}"
            ))
        })?;
        Self::from_canonical(u128::from_be_bytes(bytes)).ok_or_else(|| {
            SpreadmatchError::Serialization(format!("field element {value} not below modulus"))
        })
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i64> for FieldElement {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for FieldElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a FieldElement> for FieldElement {
    fn sum<I: Iterator<Item = &'a FieldElement>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for FieldElement {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}
