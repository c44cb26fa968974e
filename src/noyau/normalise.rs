// src/noyau/normalise.rs
//
// Normalisation textuelle AVANT tout parsing, dans cet ordre :
// 1) × ÷  -> * /
// 2) ^    -> **
// 3) π Π  -> pi
// 4) Ans  -> (valeur précédente)
// 5) 50%  -> (50/100)   (littéral numérique collé au '%' seulement)

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::format::format_nombre;
use super::nombre::Nombre;

fn motif_pourcent() -> &'static Regex {
    static MOTIF: OnceLock<Regex> = OnceLock::new();
    MOTIF.get_or_init(|| {
        Regex::new(r"([0-9]+(?:\.[0-9]*)?|\.[0-9]+)%").expect("motif pourcent invalide")
    })
}

/// Retourne la forme normalisée, ou "" si l’entrée est blanche.
pub fn normaliser(brut: &str, ans: Nombre) -> String {
    if brut.trim().is_empty() {
        return String::new();
    }

    let s = brut
        .replace('×', "*")
        .replace('÷', "/")
        .replace('^', "**")
        .replace(['π', 'Π'], "pi");

    // Substitution textuelle parenthésée : compose avec "-Ans", "Ans*2", "2^Ans"...
    let s = s.replace("Ans", &format!("({})", format_nombre(ans)));

    remplacer_pourcents(&s)
}

/// `n%` -> `(n/100)`, sauf si le numéral continue un mot ou un nombre (ex: `x1%`, `1e5%`) :
/// dans ce cas le '%' reste un modulo et le parseur tranchera.
fn remplacer_pourcents(s: &str) -> String {
    motif_pourcent()
        .replace_all(s, |caps: &Captures| {
            let complet = &caps[0];
            let debut = caps.get(0).map_or(0, |m| m.start());
            let colle = s[..debut]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.');
            if colle {
                complet.to_string()
            } else {
                format!("({}/100)", &caps[1])
            }
        })
        .into_owned()
}
