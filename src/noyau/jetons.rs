// src/noyau/jetons.rs

use std::fmt;

use super::erreur::{ErreurEval, ResultatEval};
use super::format::format_nombre;
use super::nombre::Nombre;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Nombre),
    // Littéraux lus pour être refusés proprement à l’évaluation (pas de coercition).
    Imaginaire(f64), // 2j
    Texte(String),   // 'abc'

    // Fonctions + constantes + tout autre nom (le tri se fait à l’évaluation)
    Ident(String),

    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,

    // Opérateurs reconnus mais hors liste blanche
    At,
    Tilde,
    Amp,
    Pipe,
    ShiftL,
    ShiftR,

    LPar,
    RPar,
    Comma,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(n) => write!(f, "{}", format_nombre(*n)),
            Tok::Imaginaire(x) => write!(f, "{x}j"),
            Tok::Texte(s) => write!(f, "'{s}'"),
            Tok::Ident(name) => write!(f, "{name}"),

            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::StarStar => f.write_str("**"),
            Tok::Slash => f.write_str("/"),
            Tok::SlashSlash => f.write_str("//"),
            Tok::Percent => f.write_str("%"),

            Tok::At => f.write_str("@"),
            Tok::Tilde => f.write_str("~"),
            Tok::Amp => f.write_str("&"),
            Tok::Pipe => f.write_str("|"),
            Tok::ShiftL => f.write_str("<<"),
            Tok::ShiftR => f.write_str(">>"),

            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Comma => f.write_str(","),
        }
    }
}

/// Tokenize une chaîne normalisée en jetons.
/// Supporte:
/// - entiers (12), décimaux (1.5, .5, 5.), exposants (1e3, 2.5E-2), imaginaires (2j)
/// - chaînes '…' / "…" (refusées plus tard)
/// - opérateurs + - * ** / // % et @ ~ & | << >>
/// - parenthèses, virgule
/// - identifiants (sensibles à la casse)
pub fn tokenize(s: &str) -> ResultatEval<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        let suivant = chars.get(i + 1).copied();

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs sur deux caractères d’abord
        let double = match (c, suivant) {
            ('*', Some('*')) => Some(Tok::StarStar),
            ('/', Some('/')) => Some(Tok::SlashSlash),
            ('<', Some('<')) => Some(Tok::ShiftL),
            ('>', Some('>')) => Some(Tok::ShiftR),
            _ => None,
        };
        if let Some(t) = double {
            out.push(t);
            i += 2;
            continue;
        }

        let simple = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            '@' => Some(Tok::At),
            '~' => Some(Tok::Tilde),
            '&' => Some(Tok::Amp),
            '|' => Some(Tok::Pipe),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Chaînes : lues pour produire un littéral non numérique
        if c == '\'' || c == '"' {
            let (texte, fin) = lire_chaine(&chars, i)?;
            out.push(Tok::Texte(texte));
            i = fin;
            continue;
        }

        // Nombres
        if c.is_ascii_digit() || (c == '.' && suivant.is_some_and(|d| d.is_ascii_digit())) {
            let (tok, fin) = lire_nombre(&chars, i)?;
            out.push(tok);
            i = fin;
            continue;
        }

        // Identifiants : lettre ou '_' puis alphanumériques
        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `start`. Retourne (jeton, position suivante).
fn lire_nombre(chars: &[char], start: usize) -> ResultatEval<(Tok, usize)> {
    let chiffres = |mut i: usize| {
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = chiffres(start);
    let mut reel = false;

    if i < chars.len() && chars[i] == '.' {
        reel = true;
        i = chiffres(i + 1);
    }

    // Exposant seulement s’il est complet : "2e" reste "2" suivi du nom "e".
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            reel = true;
            i = chiffres(j);
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let invalide = || ErreurEval::syntaxe(format!("nombre invalide : {texte}"));

    if i < chars.len() && (chars[i] == 'j' || chars[i] == 'J') {
        let x: f64 = texte.parse().map_err(|_| invalide())?;
        return Ok((Tok::Imaginaire(x), i + 1));
    }

    let n = if reel {
        Nombre::Reel(texte.parse().map_err(|_| invalide())?)
    } else {
        // Entier trop grand pour i64 => lu comme réel
        match texte.parse::<i64>() {
            Ok(v) => Nombre::Entier(v),
            Err(_) => Nombre::Reel(texte.parse().map_err(|_| invalide())?),
        }
    };

    Ok((Tok::Num(n), i))
}

/// Lit une chaîne délimitée par `chars[start]`. Les échappements `\x` sont sautés tels quels.
fn lire_chaine(chars: &[char], start: usize) -> ResultatEval<(String, usize)> {
    let delim = chars[start];
    let mut i = start + 1;
    let mut texte = String::new();

    while i < chars.len() {
        match chars[i] {
            c if c == delim => return Ok((texte, i + 1)),
            '\\' if i + 1 < chars.len() => {
                texte.push(chars[i + 1]);
                i += 2;
            }
            c => {
                texte.push(c);
                i += 1;
            }
        }
    }

    Err(ErreurEval::syntaxe("chaîne non terminée"))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
