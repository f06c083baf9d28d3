//! Secret sharing polynomials and Lagrange recovery.
//!
//! A secret is shared by sampling a polynomial `f` of degree `t-1` whose
//! constant term is the secret, and handing participant `i` the evaluation
//! `f(i+1)`. Any `t` shares recover the polynomial (and hence the secret)
//! through Lagrange interpolation; fewer reveal nothing.
//!
//! [`PriPoly`] is the secret polynomial; [`PubPoly`] is its public image under
//! a commitment base, against which individual shares can be checked.

use core::iter;

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{
    serialization::{SerializableElement, SerializableScalar},
    Ciphersuite, Element, Error, Field, Group, Scalar,
};

/// A share of a secret polynomial: the index `i` of the holder together with
/// the evaluation `f(i+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct PriShare<C: Ciphersuite> {
    pub(crate) index: u32,
    pub(crate) value: SerializableScalar<C>,
}

impl<C> PriShare<C>
where
    C: Ciphersuite,
{
    /// Create a share from an index and a scalar value.
    pub fn new(index: u32, value: Scalar<C>) -> Self {
        Self {
            index,
            value: SerializableScalar(value),
        }
    }

    /// The index of the participant holding this share.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The share value `f(index+1)`. This is secret.
    pub fn value(&self) -> Scalar<C> {
        self.value.0
    }
}

impl<C> Zeroize for PriShare<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        self.value = SerializableScalar(<<C::Group as Group>::Field>::zero());
    }
}

/// A public share of a committed polynomial: the index `i` together with the
/// group element `F(i+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct PubShare<C: Ciphersuite> {
    pub(crate) index: u32,
    pub(crate) value: SerializableElement<C>,
}

impl<C> PubShare<C>
where
    C: Ciphersuite,
{
    /// Create a public share from an index and a group element.
    pub fn new(index: u32, value: Element<C>) -> Self {
        Self {
            index,
            value: SerializableElement(value),
        }
    }

    /// The index of the participant holding this share.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The share value `F(index+1)`.
    pub fn value(&self) -> Element<C> {
        self.value.0
    }
}

/// Compute the field coordinate `index + 1` at which the share with the given
/// index is evaluated. Shares are one-indexed in the field, so the coordinate
/// is never zero (`f(0)` is the secret).
pub(crate) fn share_coordinate<C: Ciphersuite>(index: u32) -> Scalar<C> {
    let n = u64::from(index) + 1;
    let one = <<C::Group as Group>::Field>::one();

    // Classic left-to-right double-and-add that skips the leading bit 1
    // (n >= 1, so there is always one), thus `sum` starts at one as well.
    let mut sum = one;
    let bits = u64::BITS - n.leading_zeros();
    for i in (0..bits - 1).rev() {
        sum = sum + sum;
        if n & (1 << i) != 0 {
            sum = sum + one;
        }
    }
    sum
}

/// A secret sharing polynomial `f(x) = a_0 + a_1 x + … + a_{t-1} x^{t-1}` over
/// the scalar field, with `a_0` the shared secret.
///
/// Immutable after construction. Equality compares all coefficients without
/// early exit; the scalar comparison itself is constant-time per the [`Field`]
/// contract.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(transparent)]
pub struct PriPoly<C: Ciphersuite> {
    pub(crate) coefficients: Vec<SerializableScalar<C>>,
}

impl<C> PriPoly<C>
where
    C: Ciphersuite,
{
    /// Sample a new secret sharing polynomial with `threshold` coefficients.
    ///
    /// If `secret` is given it becomes the constant term; otherwise the secret
    /// is sampled along with the other coefficients. Fails with
    /// [`Error::InvalidThreshold`] if `threshold < 2`.
    pub fn new<R: RngCore + CryptoRng>(
        threshold: u32,
        secret: Option<Scalar<C>>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if threshold < 2 {
            return Err(Error::InvalidThreshold);
        }

        let constant = secret.unwrap_or_else(|| <<C::Group as Group>::Field>::random(rng));
        let coefficients = iter::once(constant)
            .chain(iter::repeat_with(|| <<C::Group as Group>::Field>::random(rng)))
            .take(threshold as usize)
            .map(SerializableScalar)
            .collect();

        Ok(Self { coefficients })
    }

    /// Rebuild a polynomial from coefficients exported with
    /// [`PriPoly::coefficients`], constant term first.
    pub fn from_coefficients(coefficients: Vec<Scalar<C>>) -> Self {
        Self {
            coefficients: coefficients.into_iter().map(SerializableScalar).collect(),
        }
    }

    /// Export the coefficients, constant term first.
    pub fn coefficients(&self) -> Vec<Scalar<C>> {
        self.coefficients.iter().map(|c| c.0).collect()
    }

    /// The number of shares needed to recover this polynomial.
    pub fn threshold(&self) -> u32 {
        self.coefficients.len() as u32
    }

    /// The shared secret, i.e. the constant term.
    pub fn secret(&self) -> Scalar<C> {
        self.coefficients
            .first()
            .expect("polynomials always have at least one coefficient")
            .0
    }

    /// Evaluate the polynomial at the field coordinate `index + 1` using
    /// Horner's method.
    pub fn eval(&self, index: u32) -> PriShare<C> {
        let x = share_coordinate::<C>(index);

        let mut value = <<C::Group as Group>::Field>::zero();
        for coeff in self.coefficients.iter().skip(1).rev() {
            value = value + coeff.0;
            value = value * x;
        }
        value = value
            + self
                .coefficients
                .first()
                .expect("polynomials always have at least one coefficient")
                .0;

        PriShare::new(index, value)
    }

    /// Produce the shares of the first `n` participants. Fails with
    /// [`Error::InvalidThreshold`] if `n` is below the threshold.
    pub fn shares(&self, n: u32) -> Result<Vec<PriShare<C>>, Error> {
        if n < self.threshold() {
            return Err(Error::InvalidThreshold);
        }
        Ok((0..n).map(|i| self.eval(i)).collect())
    }

    /// Coefficient-wise sum of two polynomials of the same threshold.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.threshold() != other.threshold() {
            return Err(Error::ThresholdMismatch);
        }

        let coefficients = self
            .coefficients
            .iter()
            .zip(other.coefficients.iter())
            .map(|(a, b)| SerializableScalar(a.0 + b.0))
            .collect();
        Ok(Self { coefficients })
    }

    /// Multiply two polynomials, producing one of degree
    /// `deg(self) + deg(other)`.
    ///
    /// The result has more coefficients than either input and is no longer a
    /// sharing polynomial of the same threshold; this is the building block
    /// for bivariate constructions.
    pub fn mul(&self, other: &Self) -> Self {
        let zero = <<C::Group as Group>::Field>::zero();
        let len = self.coefficients.len() + other.coefficients.len() - 1;
        let mut coefficients = vec![zero; len];

        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] = coefficients[i + j] + a.0 * b.0;
            }
        }

        Self {
            coefficients: coefficients.into_iter().map(SerializableScalar).collect(),
        }
    }

    /// Commit to the polynomial by multiplying every coefficient with the
    /// given base, or the group generator if no base is given.
    ///
    /// The commitment is a homomorphic image: any algebraic identity that
    /// holds between secret polynomials holds between their commitments.
    pub fn commit(&self, base: Option<Element<C>>) -> PubPoly<C> {
        let base = base.unwrap_or_else(<C::Group>::generator);
        let commitments = self
            .coefficients
            .iter()
            .map(|a| SerializableElement(base * a.0))
            .collect();

        PubPoly {
            base: SerializableElement(base),
            commitments,
        }
    }
}

impl<C> PartialEq for PriPoly<C>
where
    C: Ciphersuite,
{
    fn eq(&self, other: &Self) -> bool {
        if self.coefficients.len() != other.coefficients.len() {
            return false;
        }
        // No early exit on the first mismatching coefficient.
        self.coefficients
            .iter()
            .zip(other.coefficients.iter())
            .fold(true, |acc, (a, b)| acc & (a.0 == b.0))
    }
}

impl<C> Eq for PriPoly<C> where C: Ciphersuite {}

impl<C> Zeroize for PriPoly<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        for coeff in self.coefficients.iter_mut() {
            *coeff = SerializableScalar(<<C::Group as Group>::Field>::zero());
        }
    }
}

/// The public image of a [`PriPoly`] under a commitment base `B`:
/// `A_k = a_k · B`. `A_0` commits to the secret.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct PubPoly<C: Ciphersuite> {
    pub(crate) base: SerializableElement<C>,
    pub(crate) commitments: Vec<SerializableElement<C>>,
}

impl<C> PubPoly<C>
where
    C: Ciphersuite,
{
    /// Assemble a public polynomial from a base point and coefficient
    /// commitments.
    pub fn new(base: Element<C>, commitments: Vec<Element<C>>) -> Self {
        Self {
            base: SerializableElement(base),
            commitments: commitments.into_iter().map(SerializableElement).collect(),
        }
    }

    /// The commitment base.
    pub fn base(&self) -> Element<C> {
        self.base.0
    }

    /// The coefficient commitments, constant term first.
    pub fn commitments(&self) -> Vec<Element<C>> {
        self.commitments.iter().map(|c| c.0).collect()
    }

    /// The number of shares needed to recover the committed polynomial.
    pub fn threshold(&self) -> u32 {
        self.commitments.len() as u32
    }

    /// The commitment to the secret, i.e. `A_0 = secret · B`.
    pub fn commit(&self) -> Element<C> {
        self.commitments
            .first()
            .expect("polynomials always have at least one coefficient")
            .0
    }

    /// Evaluate the committed polynomial at the field coordinate `index + 1`:
    /// `Σ_k A_k · (index+1)^k`.
    pub fn eval(&self, index: u32) -> PubShare<C> {
        let x = share_coordinate::<C>(index);

        let (_, value) = self.commitments.iter().fold(
            (<<C::Group as Group>::Field>::one(), <C::Group>::identity()),
            |(x_to_the_k, sum_so_far), comm_k| (x * x_to_the_k, sum_so_far + comm_k.0 * x_to_the_k),
        );

        PubShare::new(index, value)
    }

    /// Produce the public shares of the first `n` participants. Fails with
    /// [`Error::InvalidThreshold`] if `n` is below the threshold.
    pub fn shares(&self, n: u32) -> Result<Vec<PubShare<C>>, Error> {
        if n < self.threshold() {
            return Err(Error::InvalidThreshold);
        }
        Ok((0..n).map(|i| self.eval(i)).collect())
    }

    /// Coefficient-wise sum of two public polynomials of the same threshold.
    ///
    /// The base of the left operand is retained; the operands must have been
    /// committed over the same base for the sum to commit to the summed
    /// secret polynomial.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.threshold() != other.threshold() {
            return Err(Error::ThresholdMismatch);
        }

        let commitments = self
            .commitments
            .iter()
            .zip(other.commitments.iter())
            .map(|(a, b)| SerializableElement(a.0 + b.0))
            .collect();
        Ok(Self {
            base: self.base,
            commitments,
        })
    }

    /// Check that a private share is consistent with this commitment
    /// polynomial: `share.value · B == Σ_k A_k · (index+1)^k`.
    pub fn check(&self, share: &PriShare<C>) -> bool {
        self.base.0 * share.value() == self.eval(share.index()).value()
    }
}

impl<C> PartialEq for PubPoly<C>
where
    C: Ciphersuite,
{
    fn eq(&self, other: &Self) -> bool {
        if self.commitments.len() != other.commitments.len() {
            return false;
        }
        self.base.0 == other.base.0
            && self
                .commitments
                .iter()
                .zip(other.commitments.iter())
                .fold(true, |acc, (a, b)| acc & (a.0 == b.0))
    }
}

impl<C> Eq for PubPoly<C> where C: Ciphersuite {}

/// Select the first `threshold` present shares in input order, rejecting
/// duplicate indices among the selected ones.
fn select<S: Copy>(
    shares: &[Option<S>],
    threshold: u32,
    index_of: impl Fn(&S) -> u32,
) -> Result<Vec<S>, Error> {
    let mut seen = std::collections::BTreeSet::new();
    let mut selected = Vec::with_capacity(threshold as usize);

    for share in shares.iter().flatten() {
        let index = index_of(share);
        if !seen.insert(index) {
            return Err(Error::DuplicateIndex { index });
        }
        selected.push(*share);
        if selected.len() == threshold as usize {
            break;
        }
    }

    if selected.len() < threshold as usize {
        return Err(Error::NotEnoughShares);
    }
    Ok(selected)
}

/// The Lagrange basis coefficient `λ_j(0) = Π_{k≠j} (-x_k) / (x_j - x_k)` for
/// the basis point `j` of the given coordinates.
fn lagrange_basis_at_zero<C: Ciphersuite>(coordinates: &[Scalar<C>], j: usize) -> Result<Scalar<C>, Error> {
    let zero = <<C::Group as Group>::Field>::zero();
    let x_j = coordinates[j];

    let mut num = <<C::Group as Group>::Field>::one();
    let mut den = <<C::Group as Group>::Field>::one();
    for (k, x_k) in coordinates.iter().enumerate() {
        if k == j {
            continue;
        }
        num = num * (zero - *x_k);
        den = den * (x_j - *x_k);
    }

    // The denominator only vanishes for coinciding coordinates, which the
    // duplicate-index check already rejected.
    let inv = <<C::Group as Group>::Field>::invert(&den)?;
    Ok(num * inv)
}

/// Recover the shared secret `f(0)` from a sparse list of private shares.
///
/// The first `threshold` present shares in input order form the interpolation
/// basis. Fails with [`Error::NotEnoughShares`] if fewer are present and with
/// [`Error::DuplicateIndex`] if an index repeats among them.
pub fn recover_secret<C: Ciphersuite>(
    shares: &[Option<PriShare<C>>],
    threshold: u32,
) -> Result<Scalar<C>, Error> {
    let selected = select(shares, threshold, |s: &PriShare<C>| s.index())?;
    let coordinates: Vec<_> = selected
        .iter()
        .map(|s| share_coordinate::<C>(s.index()))
        .collect();

    let mut secret = <<C::Group as Group>::Field>::zero();
    for (j, share) in selected.iter().enumerate() {
        let lambda = lagrange_basis_at_zero::<C>(&coordinates, j)?;
        secret = secret + lambda * share.value();
    }
    Ok(secret)
}

/// Recover the secret commitment `F(0)` from a sparse list of public shares.
///
/// The group-side counterpart of [`recover_secret`], with the same selection
/// and failure behavior.
pub fn recover_commit<C: Ciphersuite>(
    shares: &[Option<PubShare<C>>],
    threshold: u32,
) -> Result<Element<C>, Error> {
    let selected = select(shares, threshold, |s: &PubShare<C>| s.index())?;
    let coordinates: Vec<_> = selected
        .iter()
        .map(|s| share_coordinate::<C>(s.index()))
        .collect();

    let mut commit = <C::Group>::identity();
    for (j, share) in selected.iter().enumerate() {
        let lambda = lagrange_basis_at_zero::<C>(&coordinates, j)?;
        commit = commit + share.value() * lambda;
    }
    Ok(commit)
}

/// Multiply the polynomial given by `coefficients` with the linear factor
/// `(x - root)`.
fn mul_linear_factor<C: Ciphersuite>(coefficients: &[Scalar<C>], root: Scalar<C>) -> Vec<Scalar<C>> {
    let zero = <<C::Group as Group>::Field>::zero();
    let neg_root = zero - root;

    let mut product = vec![zero; coefficients.len() + 1];
    for (i, c) in coefficients.iter().enumerate() {
        product[i + 1] = product[i + 1] + *c;
        product[i] = product[i] + *c * neg_root;
    }
    product
}

/// Recover the entire secret polynomial, not just `f(0)`, by full Lagrange
/// interpolation over the first `threshold` present shares.
///
/// The result is invariant under permutation of the input list: any selection
/// of `threshold` valid shares of the same polynomial reconstructs equal
/// coefficients.
pub fn recover_pri_poly<C: Ciphersuite>(
    shares: &[Option<PriShare<C>>],
    threshold: u32,
) -> Result<PriPoly<C>, Error> {
    let selected = select(shares, threshold, |s: &PriShare<C>| s.index())?;
    let coordinates: Vec<_> = selected
        .iter()
        .map(|s| share_coordinate::<C>(s.index()))
        .collect();

    let zero = <<C::Group as Group>::Field>::zero();
    let one = <<C::Group as Group>::Field>::one();
    let mut accumulator = vec![zero; threshold as usize];

    for (j, share) in selected.iter().enumerate() {
        // Numerator basis polynomial Π_{k≠j} (x - x_k) and its denominator
        // Π_{k≠j} (x_j - x_k).
        let mut basis = vec![one];
        let mut den = one;
        for (k, x_k) in coordinates.iter().enumerate() {
            if k == j {
                continue;
            }
            basis = mul_linear_factor::<C>(&basis, *x_k);
            den = den * (coordinates[j] - *x_k);
        }

        let scale = share.value() * <<C::Group as Group>::Field>::invert(&den)?;
        for (acc, b) in accumulator.iter_mut().zip(basis.iter()) {
            *acc = *acc + *b * scale;
        }
    }

    Ok(PriPoly::from_coefficients(accumulator))
}

/// Recover the entire committed polynomial from a sparse list of public
/// shares, the group-side counterpart of [`recover_pri_poly`].
///
/// The returned polynomial uses the group generator as its base.
pub fn recover_pub_poly<C: Ciphersuite>(
    shares: &[Option<PubShare<C>>],
    threshold: u32,
) -> Result<PubPoly<C>, Error> {
    let selected = select(shares, threshold, |s: &PubShare<C>| s.index())?;
    let coordinates: Vec<_> = selected
        .iter()
        .map(|s| share_coordinate::<C>(s.index()))
        .collect();

    let one = <<C::Group as Group>::Field>::one();
    let mut accumulator = vec![<C::Group>::identity(); threshold as usize];

    for (j, share) in selected.iter().enumerate() {
        let mut basis = vec![one];
        let mut den = one;
        for (k, x_k) in coordinates.iter().enumerate() {
            if k == j {
                continue;
            }
            basis = mul_linear_factor::<C>(&basis, *x_k);
            den = den * (coordinates[j] - *x_k);
        }

        let inv = <<C::Group as Group>::Field>::invert(&den)?;
        for (acc, b) in accumulator.iter_mut().zip(basis.iter()) {
            *acc = *acc + share.value() * (*b * inv);
        }
    }

    Ok(PubPoly::new(<C::Group>::generator(), accumulator))
}
