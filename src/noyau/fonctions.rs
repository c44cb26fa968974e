// src/noyau/fonctions.rs
//
// Liste blanche des fonctions + constantes nommées + mode d’angle.
// - Tout nom absent de `Fonction::depuis_nom` est refusé (pas de registre dynamique).
// - Mode degrés : sin/cos/tan convertissent l’argument (deg -> rad),
//   asin/acos/atan convertissent le résultat (rad -> deg).

use std::f64::consts;

use num_traits::ToPrimitive;

use super::erreur::{ErreurEval, ResultatEval};
use super::nombre::Nombre;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl ModeAngle {
    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Radians => ModeAngle::Degres,
            ModeAngle::Degres => ModeAngle::Radians,
        }
    }

    pub fn est_degres(self) -> bool {
        self == ModeAngle::Degres
    }

    fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_radians(),
        }
    }

    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_degrees(),
        }
    }
}

/// Constantes nommées : {pi, e}.
pub fn constante(nom: &str) -> Option<Nombre> {
    match nom {
        "pi" => Some(Nombre::Reel(consts::PI)),
        "e" => Some(Nombre::Reel(consts::E)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Ln,
    Abs,
    Round,
    Floor,
    Ceil,
    Pow,
}

impl Fonction {
    pub const TOUTES: [Fonction; 14] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sqrt,
        Fonction::Log,
        Fonction::Ln,
        Fonction::Abs,
        Fonction::Round,
        Fonction::Floor,
        Fonction::Ceil,
        Fonction::Pow,
    ];

    /// Sensible à la casse : `SIN` n’est pas `sin`.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Abs => "abs",
            Fonction::Round => "round",
            Fonction::Floor => "floor",
            Fonction::Ceil => "ceil",
            Fonction::Pow => "pow",
        }
    }

    /// (min, max) arguments.
    fn arite(self) -> (usize, usize) {
        match self {
            Fonction::Log | Fonction::Ln | Fonction::Round => (1, 2),
            Fonction::Pow => (2, 3),
            _ => (1, 1),
        }
    }

    fn verifier_arite(self, n: usize) -> ResultatEval<()> {
        let (min, max) = self.arite();
        if (min..=max).contains(&n) {
            return Ok(());
        }
        let attendu = if min == max {
            format!("{min}")
        } else {
            format!("{min} à {max}")
        };
        Err(ErreurEval::arguments(
            self.nom(),
            format!("{attendu} argument(s) attendu(s), {n} reçu(s)"),
        ))
    }

    pub fn appliquer(self, args: &[Nombre], mode: ModeAngle) -> ResultatEval<Nombre> {
        self.verifier_arite(args.len())?;
        let x = args[0];

        match self {
            Fonction::Sin | Fonction::Cos | Fonction::Tan => {
                trig_directe(self, mode.vers_radians(x.en_reel()))
            }
            Fonction::Asin | Fonction::Acos | Fonction::Atan => {
                let r = trig_inverse(self, x.en_reel())?;
                Ok(Nombre::Reel(mode.depuis_radians(r)))
            }
            Fonction::Sqrt => {
                let v = x.en_reel();
                if v < 0.0 {
                    return Err(ErreurEval::math("racine carrée d’un négatif"));
                }
                Ok(Nombre::Reel(v.sqrt()))
            }
            Fonction::Log | Fonction::Ln => logarithme(x, args.get(1).copied()),
            Fonction::Abs => Ok(x.abs()),
            Fonction::Round => match args.get(1) {
                None => arrondi(x),
                Some(&n) => arrondi_decimales(x, n),
            },
            Fonction::Floor => vers_entier(x, f64::floor),
            Fonction::Ceil => vers_entier(x, f64::ceil),
            Fonction::Pow => match args {
                [a, b] => a.puissance(*b),
                [a, b, m] => puissance_modulaire(*a, *b, *m),
                _ => Err(ErreurEval::arguments("pow", "2 ou 3 arguments attendus")),
            },
        }
    }
}

/* ------------------------ Trigonométrie ------------------------ */

fn trig_directe(f: Fonction, rad: f64) -> ResultatEval<Nombre> {
    if rad.is_infinite() {
        return Err(ErreurEval::math(format!("{}(∞) indéfini", f.nom())));
    }
    let v = match f {
        Fonction::Sin => rad.sin(),
        Fonction::Cos => rad.cos(),
        _ => rad.tan(),
    };
    Ok(Nombre::Reel(v))
}

fn trig_inverse(f: Fonction, x: f64) -> ResultatEval<f64> {
    match f {
        Fonction::Asin | Fonction::Acos if x.abs() > 1.0 => Err(ErreurEval::math(format!(
            "{}({x}) hors domaine [-1, 1]",
            f.nom()
        ))),
        Fonction::Asin => Ok(x.asin()),
        Fonction::Acos => Ok(x.acos()),
        _ => Ok(x.atan()),
    }
}

/* ------------------------ Logarithmes ------------------------ */

fn ln_strict(x: f64) -> ResultatEval<f64> {
    if x <= 0.0 {
        return Err(ErreurEval::math("logarithme d’un nombre non positif"));
    }
    Ok(x.ln())
}

/// log(x) = ln x ; log(x, b) = ln x / ln b.
fn logarithme(x: Nombre, base: Option<Nombre>) -> ResultatEval<Nombre> {
    let ln_x = ln_strict(x.en_reel())?;
    let Some(base) = base else {
        return Ok(Nombre::Reel(ln_x));
    };

    let ln_b = ln_strict(base.en_reel())?;
    if ln_b == 0.0 {
        return Err(ErreurEval::math("logarithme en base 1 (division par zéro)"));
    }
    Ok(Nombre::Reel(ln_x / ln_b))
}

/* ------------------------ Arrondis ------------------------ */

/// Réel -> Entier (repli réel au-delà de i64). NaN et ∞ refusés.
fn entier_depuis_reel(v: f64) -> ResultatEval<Nombre> {
    if v.is_nan() {
        return Err(ErreurEval::math("conversion de NaN en entier"));
    }
    if v.is_infinite() {
        return Err(ErreurEval::math("conversion de l’infini en entier"));
    }
    Ok(v.to_i64().map_or(Nombre::Reel(v), Nombre::Entier))
}

fn vers_entier(x: Nombre, f: fn(f64) -> f64) -> ResultatEval<Nombre> {
    match x {
        Nombre::Entier(_) => Ok(x),
        Nombre::Reel(v) => entier_depuis_reel(f(v)),
    }
}

/// round(x) : entier, demi vers le pair.
fn arrondi(x: Nombre) -> ResultatEval<Nombre> {
    match x {
        Nombre::Entier(_) => Ok(x),
        Nombre::Reel(v) => entier_depuis_reel(v.round_ties_even()),
    }
}

/// round(x, n) : même nature que x, n décimales (n entier, éventuellement négatif).
fn arrondi_decimales(x: Nombre, n: Nombre) -> ResultatEval<Nombre> {
    let Nombre::Entier(n) = n else {
        return Err(ErreurEval::arguments(
            "round",
            "le nombre de décimales doit être entier",
        ));
    };

    match x {
        Nombre::Entier(v) => Ok(arrondi_entier(v, n)),
        Nombre::Reel(v) => Ok(Nombre::Reel(arrondi_reel(v, n))),
    }
}

fn arrondi_entier(v: i64, n: i64) -> Nombre {
    if n >= 0 {
        return Nombre::Entier(v);
    }
    let Some(p) = u32::try_from(-n).ok().and_then(|k| 10_i64.checked_pow(k)) else {
        return Nombre::Entier(0);
    };

    let q = v.div_euclid(p);
    let r = v.rem_euclid(p);
    let double = r * 2;
    let q = if double > p || (double == p && q % 2 != 0) {
        q + 1
    } else {
        q
    };
    q.checked_mul(p)
        .map_or(Nombre::Reel(q as f64 * p as f64), Nombre::Entier)
}

fn arrondi_reel(v: f64, n: i64) -> f64 {
    if !v.is_finite() || n > 323 {
        return v;
    }
    if n < -308 {
        return 0.0 * v;
    }
    if n >= 0 {
        // Le formatage décimal de Rust arrondit sur la valeur binaire exacte.
        return format!("{:.*}", n as usize, v).parse().unwrap_or(v);
    }
    let p = 10_f64.powi(-n as i32);
    (v / p).round_ties_even() * p
}

/* ------------------------ pow(a, b, m) ------------------------ */

fn puissance_modulaire(a: Nombre, b: Nombre, m: Nombre) -> ResultatEval<Nombre> {
    let (Nombre::Entier(a), Nombre::Entier(b), Nombre::Entier(m)) = (a, b, m) else {
        return Err(ErreurEval::arguments(
            "pow",
            "pow() à 3 arguments exige des entiers",
        ));
    };
    if m == 0 {
        return Err(ErreurEval::math("pow() : module nul"));
    }
    if b < 0 {
        return Err(ErreurEval::math(
            "pow() : exposant négatif avec module non supporté",
        ));
    }

    let n = (m as i128).abs();
    let mut base = (a as i128).rem_euclid(n);
    let mut e = b;
    let mut acc: i128 = 1 % n;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc * base % n;
        }
        base = base * base % n;
        e >>= 1;
    }

    // Le résultat prend le signe du module.
    let r = if m < 0 && acc != 0 { acc - n } else { acc };
    Ok(Nombre::Entier(r as i64))
}
