// src/noyau/nombre.rs
//
// Valeur numérique du noyau : entier machine ou réel.
// - Entier op Entier reste entier (+ - * // % et ** à exposant >= 0)
// - "/" donne toujours un réel
// - dépassement i64 => repli en réel (pas de précision arbitraire)
// - division entière / modulo : arrondi vers -∞, signe du modulo = signe du diviseur

use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{ToPrimitive, Zero};

use super::erreur::{ErreurEval, ResultatEval};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nombre {
    Entier(i64),
    Reel(f64),
}

impl Default for Nombre {
    fn default() -> Self {
        Nombre::Entier(0)
    }
}

impl From<i64> for Nombre {
    fn from(n: i64) -> Self {
        Nombre::Entier(n)
    }
}

impl From<i32> for Nombre {
    fn from(n: i32) -> Self {
        Nombre::Entier(n.into())
    }
}

impl From<f64> for Nombre {
    fn from(x: f64) -> Self {
        Nombre::Reel(x)
    }
}

impl Nombre {
    pub fn en_reel(self) -> f64 {
        match self {
            Nombre::Entier(n) => n as f64,
            Nombre::Reel(x) => x,
        }
    }

    pub fn est_fini(self) -> bool {
        match self {
            Nombre::Entier(_) => true,
            Nombre::Reel(x) => x.is_finite(),
        }
    }

    pub fn est_nul(self) -> bool {
        match self {
            Nombre::Entier(n) => n.is_zero(),
            Nombre::Reel(x) => x.is_zero(),
        }
    }

    /// Réel mathématiquement entier (et dans i64) => Entier. `4/2` donne `Entier(2)`.
    pub fn normalise(self) -> Nombre {
        match self {
            Nombre::Reel(x) if x.is_finite() && x.fract() == 0.0 => {
                x.to_i64().map_or(self, Nombre::Entier)
            }
            _ => self,
        }
    }

    pub fn abs(self) -> Nombre {
        match self {
            Nombre::Entier(n) => n
                .checked_abs()
                .map_or(Nombre::Reel((n as f64).abs()), Nombre::Entier),
            Nombre::Reel(x) => Nombre::Reel(x.abs()),
        }
    }

    /// Division vraie : toujours un réel.
    pub fn div(self, autre: Nombre) -> ResultatEval<Nombre> {
        if autre.est_nul() {
            return Err(ErreurEval::math("division par zéro"));
        }
        Ok(Nombre::Reel(self.en_reel() / autre.en_reel()))
    }

    /// Division entière (`//`), arrondie vers -∞.
    pub fn div_entiere(self, autre: Nombre) -> ResultatEval<Nombre> {
        if autre.est_nul() {
            return Err(ErreurEval::math("division entière par zéro"));
        }
        if let (Nombre::Entier(a), Nombre::Entier(b)) = (self, autre) {
            if let Some(q) = div_plancher_i64(a, b) {
                return Ok(Nombre::Entier(q));
            }
        }
        Ok(Nombre::Reel(divmod_reel(self.en_reel(), autre.en_reel()).0))
    }

    /// Modulo (`%`), du signe du diviseur.
    pub fn modulo(self, autre: Nombre) -> ResultatEval<Nombre> {
        if autre.est_nul() {
            return Err(ErreurEval::math("modulo par zéro"));
        }
        if let (Nombre::Entier(a), Nombre::Entier(b)) = (self, autre) {
            let r = a.wrapping_rem(b);
            let r = if r != 0 && ((r < 0) != (b < 0)) { r + b } else { r };
            return Ok(Nombre::Entier(r));
        }
        Ok(Nombre::Reel(divmod_reel(self.en_reel(), autre.en_reel()).1))
    }

    /// Puissance (`**` et `pow(a, b)`).
    pub fn puissance(self, exposant: Nombre) -> ResultatEval<Nombre> {
        if let (Nombre::Entier(a), Nombre::Entier(b)) = (self, exposant) {
            if b >= 0 {
                if let Some(v) = puissance_entiere(a, b) {
                    return Ok(Nombre::Entier(v));
                }
            }
        }
        puissance_reelle(self.en_reel(), exposant.en_reel())
    }
}

impl Add for Nombre {
    type Output = Nombre;

    fn add(self, autre: Nombre) -> Nombre {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => a
                .checked_add(b)
                .map_or(Nombre::Reel(a as f64 + b as f64), Nombre::Entier),
            (a, b) => Nombre::Reel(a.en_reel() + b.en_reel()),
        }
    }
}

impl Sub for Nombre {
    type Output = Nombre;

    fn sub(self, autre: Nombre) -> Nombre {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => a
                .checked_sub(b)
                .map_or(Nombre::Reel(a as f64 - b as f64), Nombre::Entier),
            (a, b) => Nombre::Reel(a.en_reel() - b.en_reel()),
        }
    }
}

impl Mul for Nombre {
    type Output = Nombre;

    fn mul(self, autre: Nombre) -> Nombre {
        match (self, autre) {
            (Nombre::Entier(a), Nombre::Entier(b)) => a
                .checked_mul(b)
                .map_or(Nombre::Reel(a as f64 * b as f64), Nombre::Entier),
            (a, b) => Nombre::Reel(a.en_reel() * b.en_reel()),
        }
    }
}

impl Neg for Nombre {
    type Output = Nombre;

    fn neg(self) -> Nombre {
        match self {
            Nombre::Entier(n) => n
                .checked_neg()
                .map_or(Nombre::Reel(-(n as f64)), Nombre::Entier),
            Nombre::Reel(x) => Nombre::Reel(-x),
        }
    }
}

/* ------------------------ Helpers ------------------------ */

/// a // b sur i64 (b != 0). None si dépassement (i64::MIN // -1).
fn div_plancher_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// (a // b, a % b) sur réels, b != 0.
/// Le reste prend le signe du diviseur ; le quotient est recalé sur un entier.
fn divmod_reel(a: f64, b: f64) -> (f64, f64) {
    let mut m = a % b;
    let mut div = (a - m) / b;
    if m != 0.0 {
        if (b < 0.0) != (m < 0.0) {
            m += b;
            div -= 1.0;
        }
    } else {
        m = 0.0_f64.copysign(b);
    }

    let quotient = if div != 0.0 {
        let plancher = div.floor();
        if div - plancher > 0.5 {
            plancher + 1.0
        } else {
            plancher
        }
    } else {
        0.0_f64.copysign(a / b)
    };

    (quotient, m)
}

/// a ** b exact sur i64 (b >= 0). None si dépassement.
fn puissance_entiere(a: i64, b: i64) -> Option<i64> {
    match a {
        0 => Some(if b == 0 { 1 } else { 0 }),
        1 => Some(1),
        -1 => Some(if b % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)),
    }
}

fn puissance_reelle(a: f64, b: f64) -> ResultatEval<Nombre> {
    if a == 0.0 && b < 0.0 {
        return Err(ErreurEval::math(
            "0 ne peut pas être élevé à une puissance négative",
        ));
    }
    if a < 0.0 && b.is_finite() && b.fract() != 0.0 {
        return Err(ErreurEval::math(
            "puissance fractionnaire d’un négatif (résultat complexe)",
        ));
    }

    let r = a.powf(b);
    if !r.is_finite() && a.is_finite() && b.is_finite() {
        return Err(ErreurEval::math("dépassement de capacité"));
    }
    Ok(Nombre::Reel(r))
}
