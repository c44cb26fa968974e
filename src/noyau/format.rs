// src/noyau/format.rs
//
// Nombre -> texte.
// - format_nombre : forme "repr" (entier brut ; réel le plus court, toujours avec '.' ou exposant)
// - format_affichage : convention d’affichage UI (résultat entier => sans ".0")
//
// format_nombre sert aussi à la substitution textuelle de `Ans` : sa sortie doit être relisible par jetons.rs.

use super::nombre::Nombre;

/// Bornes de la notation décimale (hors bornes => notation scientifique).
const DECIMAL_MIN: f64 = 1e-4;
const DECIMAL_MAX: f64 = 1e16;

pub fn format_nombre(n: Nombre) -> String {
    match n {
        Nombre::Entier(v) => v.to_string(),
        Nombre::Reel(x) => format_reel(x),
    }
}

/// Affichage UI : un réel mathématiquement entier s’affiche comme un entier.
pub fn format_affichage(n: Nombre) -> String {
    format_nombre(n.normalise())
}

fn format_reel(x: f64) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return if x.is_sign_negative() {
            "-0.0".into()
        } else {
            "0.0".into()
        };
    }

    let a = x.abs();
    if (DECIMAL_MIN..DECIMAL_MAX).contains(&a) {
        // `{}` sur f64 : représentation la plus courte qui se relit à l’identique.
        let s = format!("{x}");
        return if s.contains('.') { s } else { format!("{s}.0") };
    }

    // `{:e}` donne "1.5e-7" ; on veut "1.5e-07".
    let s = format!("{x:e}");
    match s.split_once('e') {
        Some((mantisse, exposant)) => {
            let exp: i32 = exposant.parse().unwrap_or(0);
            let signe = if exp < 0 { '-' } else { '+' };
            format!("{mantisse}e{signe}{:02}", exp.abs())
        }
        None => s,
    }
}
