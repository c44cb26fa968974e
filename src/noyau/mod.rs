//! Noyau d’évaluation sûr
//!
//! Organisation interne :
//! - normalise.rs : × ÷ ^ π Ans et pourcents, avant tout parsing
//! - jetons.rs    : tokenisation
//! - arbre.rs     : AST restreint + rendus (infixe, RPN)
//! - analyse.rs   : montée de précédence + garde-fous de profondeur
//! - nombre.rs    : entier / réel et leur arithmétique
//! - fonctions.rs : liste blanche des fonctions, constantes, mode d’angle
//! - eval.rs      : pipeline complet
//! - format.rs    : nombre -> texte
//! - erreur.rs    : taxonomie des échecs

pub mod analyse;
pub mod arbre;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod nombre;
pub mod normalise;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ClasseErreur, ErreurEval};
pub use eval::{evaluer, evaluer_avec_demarche, Contexte, DemarcheNoyau};
pub use fonctions::ModeAngle;
pub use format::format_affichage;
pub use nombre::Nombre;
