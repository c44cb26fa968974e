// src/noyau/analyse.rs
//
// Jetons -> AST (montée de précédence)
//
// Précédences (faible -> forte) :
//   |   &   << >>   + -   * / // % @   unaires + - ~   **   appel
//
// Règles:
// - `**` est associatif à droite et son opérande droit peut être unaire : 2**-1, -2**2 = -(2**2)
// - l’appel est postfixé sur n’importe quel primaire : sin(x), mais aussi 2(3) ou (sin)(0)
//   (la cible est vérifiée à l’évaluation, pas ici)
// - garde-fous : imbrication (récursion du parseur) et profondeur finale de l’arbre bornées

use super::arbre::{Constante, Noeud, OpBinaire, OpUnaire};
use super::erreur::{ErreurEval, ResultatEval};
use super::jetons::Tok;

/// Imbrication maximale (parenthèses, unaires, appels) : 100 niveaux acceptés, 101 refusés.
const IMBRICATION_MAX: usize = 100;

/// Profondeur maximale de l’arbre, feuille comprise (évaluation récursive bornée).
const PROFONDEUR_MAX: usize = 1000;

fn precedence(t: &Tok) -> Option<(u8, OpBinaire)> {
    match t {
        Tok::Pipe => Some((1, OpBinaire::OuBit)),
        Tok::Amp => Some((2, OpBinaire::EtBit)),
        Tok::ShiftL => Some((3, OpBinaire::DecalageGauche)),
        Tok::ShiftR => Some((3, OpBinaire::DecalageDroite)),
        Tok::Plus => Some((4, OpBinaire::Add)),
        Tok::Minus => Some((4, OpBinaire::Sub)),
        Tok::Star => Some((5, OpBinaire::Mul)),
        Tok::Slash => Some((5, OpBinaire::Div)),
        Tok::SlashSlash => Some((5, OpBinaire::DivEntiere)),
        Tok::Percent => Some((5, OpBinaire::Modulo)),
        Tok::At => Some((5, OpBinaire::MatMul)),
        _ => None,
    }
}

/// Construit l’AST d’une suite de jetons. Toute la suite doit être consommée.
pub fn analyser(jetons: &[Tok]) -> ResultatEval<Noeud> {
    let mut a = Analyseur {
        jetons,
        pos: 0,
        imbrication: 0,
    };

    let noeud = a.expression(0)?;
    if let Some(t) = a.courant() {
        return Err(ErreurEval::syntaxe(format!("jeton inattendu : {t}")));
    }

    if noeud.profondeur() > PROFONDEUR_MAX {
        return Err(ErreurEval::syntaxe("expression trop profonde"));
    }
    Ok(noeud)
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    imbrication: usize,
}

impl<'a> Analyseur<'a> {
    fn courant(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    fn avancer(&mut self) -> Option<&'a Tok> {
        let t = self.jetons.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn consommer_si(&mut self, attendu: &Tok) -> bool {
        if self.courant() == Some(attendu) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Binaires de précédence >= prec_min, associatifs à gauche.
    fn expression(&mut self, prec_min: u8) -> ResultatEval<Noeud> {
        let mut gauche = self.unaire()?;

        while let Some((prec, op)) = self.courant().and_then(precedence) {
            if prec < prec_min {
                break;
            }
            self.pos += 1;
            let droite = self.expression(prec + 1)?;
            gauche = Noeud::binaire(op, gauche, droite);
        }

        Ok(gauche)
    }

    fn unaire(&mut self) -> ResultatEval<Noeud> {
        // Le premier appel (niveau 0) est l’expression elle-même.
        if self.imbrication > IMBRICATION_MAX {
            return Err(ErreurEval::syntaxe("expression trop imbriquée"));
        }
        self.imbrication += 1;
        let r = self.unaire_sans_garde();
        self.imbrication -= 1;
        r
    }

    fn unaire_sans_garde(&mut self) -> ResultatEval<Noeud> {
        let op = match self.courant() {
            Some(Tok::Minus) => Some(OpUnaire::Neg),
            Some(Tok::Plus) => Some(OpUnaire::Pos),
            Some(Tok::Tilde) => Some(OpUnaire::Inversion),
            _ => None,
        };

        match op {
            Some(op) => {
                self.pos += 1;
                let x = self.unaire()?;
                Ok(Noeud::unaire(op, x))
            }
            None => self.puissance(),
        }
    }

    fn puissance(&mut self) -> ResultatEval<Noeud> {
        let base = self.postfixe()?;
        if self.consommer_si(&Tok::StarStar) {
            let exposant = self.unaire()?;
            return Ok(Noeud::binaire(OpBinaire::Puissance, base, exposant));
        }
        Ok(base)
    }

    fn postfixe(&mut self) -> ResultatEval<Noeud> {
        let mut noeud = self.primaire()?;
        while self.consommer_si(&Tok::LPar) {
            let args = self.arguments()?;
            noeud = Noeud::Appel(Box::new(noeud), args);
        }
        Ok(noeud)
    }

    /// Après '(' : `a, b, c)` (virgule finale tolérée).
    fn arguments(&mut self) -> ResultatEval<Vec<Noeud>> {
        let mut args = Vec::new();
        loop {
            if self.consommer_si(&Tok::RPar) {
                return Ok(args);
            }
            args.push(self.expression(0)?);

            match self.avancer() {
                Some(Tok::Comma) => {}
                Some(Tok::RPar) => return Ok(args),
                Some(t) => {
                    return Err(ErreurEval::syntaxe(format!(
                        "jeton inattendu dans les arguments : {t}"
                    )))
                }
                None => return Err(ErreurEval::syntaxe("parenthèses non fermées")),
            }
        }
    }

    fn primaire(&mut self) -> ResultatEval<Noeud> {
        let noeud = match self.avancer() {
            Some(Tok::Num(n)) => Noeud::nombre(*n),
            Some(Tok::Imaginaire(x)) => Noeud::Litteral(Constante::Imaginaire(*x)),
            Some(Tok::Texte(s)) => Noeud::Litteral(Constante::Texte(s.clone())),
            Some(Tok::Ident(nom)) => Noeud::ident(nom),
            Some(Tok::LPar) => {
                let e = self.expression(0)?;
                if !self.consommer_si(&Tok::RPar) {
                    return Err(match self.courant() {
                        Some(t) => ErreurEval::syntaxe(format!("jeton inattendu : {t}")),
                        None => ErreurEval::syntaxe("parenthèses non fermées"),
                    });
                }
                e
            }
            Some(t) => return Err(ErreurEval::syntaxe(format!("jeton inattendu : {t}"))),
            None => return Err(ErreurEval::syntaxe("fin d’expression inattendue")),
        };
        Ok(noeud)
    }
}
