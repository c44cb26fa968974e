// src/noyau/erreur.rs
//
// Taxonomie des échecs d’évaluation.
// Toutes les erreurs sont locales et non fatales : l’UI affiche "Error" et attend.

use thiserror::Error;

/// Résultat du noyau.
pub type ResultatEval<T> = Result<T, ErreurEval>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurEval {
    /// Entrée vide (ou blanche) : no-op côté appelant.
    #[error("Entrée vide")]
    Vide,

    #[error("Erreur de syntaxe : {0}")]
    Syntaxe(String),

    /// Littéral non numérique (texte, complexe).
    #[error("Constante non supportée : {0}")]
    ConstanteNonSupportee(String),

    #[error("Identifiant inconnu : {0}")]
    IdentifiantInconnu(String),

    #[error("Opérateur non supporté : {0}")]
    OperateurNonSupporte(String),

    /// Cible d’appel hors liste blanche, ou pas un nom nu.
    #[error("Fonction non autorisée : {0}")]
    FonctionNonAutorisee(String),

    /// Mauvais nombre / type d’arguments pour une fonction autorisée.
    #[error("Arguments invalides pour {fonction} : {detail}")]
    Arguments { fonction: String, detail: String },

    /// Erreur de domaine, division par zéro, dépassement.
    #[error("Erreur mathématique : {0}")]
    Math(String),

    #[error("Résultat non numérique : {0}")]
    ResultatNonNumerique(String),
}

/// Classe sans charge utile (pratique pour les tests et la journalisation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClasseErreur {
    Vide,
    Syntaxe,
    ConstanteNonSupportee,
    IdentifiantInconnu,
    OperateurNonSupporte,
    FonctionNonAutorisee,
    Arguments,
    Math,
    ResultatNonNumerique,
}

impl ErreurEval {
    pub fn classe(&self) -> ClasseErreur {
        match self {
            ErreurEval::Vide => ClasseErreur::Vide,
            ErreurEval::Syntaxe(_) => ClasseErreur::Syntaxe,
            ErreurEval::ConstanteNonSupportee(_) => ClasseErreur::ConstanteNonSupportee,
            ErreurEval::IdentifiantInconnu(_) => ClasseErreur::IdentifiantInconnu,
            ErreurEval::OperateurNonSupporte(_) => ClasseErreur::OperateurNonSupporte,
            ErreurEval::FonctionNonAutorisee(_) => ClasseErreur::FonctionNonAutorisee,
            ErreurEval::Arguments { .. } => ClasseErreur::Arguments,
            ErreurEval::Math(_) => ClasseErreur::Math,
            ErreurEval::ResultatNonNumerique(_) => ClasseErreur::ResultatNonNumerique,
        }
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }

    pub(crate) fn math(msg: impl Into<String>) -> Self {
        ErreurEval::Math(msg.into())
    }

    pub(crate) fn arguments(fonction: &str, detail: impl Into<String>) -> Self {
        ErreurEval::Arguments {
            fonction: fonction.to_string(),
            detail: detail.into(),
        }
    }
}
