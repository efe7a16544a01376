use std::{
    fmt,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

use crate::{error::EvalError, interpreter::evaluator::core::EvalResult, util::num::is_integral};

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);

/// Represents a number of the expression language.
///
/// Every number is complex; real numbers simply have a zero imaginary part.
#[derive(Debug, Clone, Copy)]
pub struct ComplexNumber {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

/// Formats a component, folding `-0` into `0`.
fn component(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { format!("{value}") }
}

impl fmt::Display for ComplexNumber {
    /// Integers print without a fraction; imaginary parts print as `bi`
    /// after the real part, which is omitted when zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im == 0.0 {
            return write!(f, "{}", component(self.re));
        }
        let sign = if self.im < 0.0 { "-" } else { "+" };
        let im = component(self.im.abs());
        match (self.re == 0.0, sign) {
            (true, "+") => write!(f, "{im}i"),
            (true, _) => write!(f, "-{im}i"),
            (false, _) => write!(f, "{} {sign} {im}i", component(self.re)),
        }
    }
}

impl ComplexNumber {
    /// Creates `re + im·i`.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::value::complex::ComplexNumber;
    ///
    /// let z = ComplexNumber::new(2.0, -3.0);
    /// assert_eq!(z.to_string(), "2 - 3i");
    /// assert_eq!(ComplexNumber::new(0.0, 1.0).to_string(), "1i");
    /// ```
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Builds a number from its modulus and argument.
    #[must_use]
    pub fn from_polar(modulus: f64, argument: f64) -> Self {
        let (sin, cos) = argument.sin_cos();
        Self::new(modulus * cos, modulus * sin)
    }

    /// Returns `true` if the imaginary part is zero.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.im == 0.0
    }

    /// Returns `true` for real numbers without a fractional part.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::value::complex::ComplexNumber;
    ///
    /// assert!(ComplexNumber::from(42.0).is_integer());
    /// assert!(!ComplexNumber::from(4.2).is_integer());
    /// assert!(!ComplexNumber::new(1.0, 1.0).is_integer());
    /// ```
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_real() && is_integral(self.re)
    }

    /// Returns `true` if both parts are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// Returns the real part, or an error if the number is not real.
    pub fn as_real(&self) -> EvalResult<f64> {
        if self.is_real() {
            Ok(self.re)
        } else {
            Err(EvalError::type_mismatch(format!("{self} is not a real number")))
        }
    }

    /// Fails with `EvalError::Overflow` if either part is not finite.
    pub fn checked(self) -> EvalResult<Self> {
        if self.re.is_finite() && self.im.is_finite() { Ok(self) } else { Err(EvalError::Overflow) }
    }

    /// The modulus `|z|`.
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// The principal argument, in radians.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Raises the number to an integer power by repeated squaring.
    ///
    /// # Errors
    /// - `EvalError::DivisionByZero` for a negative power of zero.
    /// - `EvalError::Overflow` if an intermediate product is not finite.
    ///
    /// # Example
    /// ```
    /// use opcalc::interpreter::value::complex::{ComplexNumber, ONE};
    ///
    /// let two = ComplexNumber::from(2.0);
    /// assert_eq!(two.checked_powi(0).unwrap(), ONE);
    /// assert_eq!(two.checked_powi(-2).unwrap(), ComplexNumber::from(0.25));
    /// let i = ComplexNumber::new(0.0, 1.0);
    /// assert_eq!(i.checked_powi(2).unwrap(), ComplexNumber::from(-1.0));
    /// assert!(ComplexNumber::from(0.0).checked_powi(-1).is_err());
    /// ```
    pub fn checked_powi(self, exp: i64) -> EvalResult<Self> {
        if exp < 0 && self.is_zero() {
            return Err(EvalError::DivisionByZero);
        }

        let mut power = ONE;
        let mut square = self;
        let mut remaining = exp.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                power = (power * square).checked()?;
            }
            remaining >>= 1;
            if remaining > 0 {
                square = (square * square).checked()?;
            }
        }

        if exp < 0 { (ONE / power).checked() } else { Ok(power) }
    }

    /// Raises the number to a real power through its polar form.
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        Self::from_polar(self.abs().powf(exp), self.arg() * exp)
    }

    /// Raises the number to a complex power using the principal logarithm.
    /// Zero to any power is zero.
    #[must_use]
    pub fn powc(self, exp: Self) -> Self {
        if self.is_zero() { ZERO } else { (exp * self.ln()).exp() }
    }

    /// `e` raised to the number.
    #[must_use]
    pub fn exp(self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    /// The principal natural logarithm.
    #[must_use]
    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    fn key(self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.re), OrderedFloat(self.im))
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.is_real() && rhs.is_real() {
            return Self::from(self.re * rhs.re);
        }
        Self::new(self.re.mul_add(rhs.re, -(self.im * rhs.im)),
                  self.re.mul_add(rhs.im, self.im * rhs.re))
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    /// Division by a real number divides each part; otherwise the numerator
    /// is multiplied by the conjugate of the denominator.
    fn div(self, rhs: Self) -> Self {
        if rhs.is_real() {
            return Self::new(self.re / rhs.re, self.im / rhs.re);
        }
        let norm = rhs.re.mul_add(rhs.re, rhs.im * rhs.im);
        let conjugate = Self::new(rhs.re, -rhs.im);
        let product = self * conjugate;
        Self::new(product.re / norm, product.im / norm)
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self::new(value.into(), 0.0)
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
