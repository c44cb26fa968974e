// src/noyau/arbre.rs
//
// AST restreint (union étiquetée) :
// - Litteral    : nombre, ou constante non numérique (refusée à l’évaluation)
// - Identifiant : nom nu
// - Unaire / Binaire : opérateurs lus par le parseur (la liste blanche est appliquée à l’évaluation)
// - Appel       : cible quelconque + arguments (seul un nom nu autorisé passera l’évaluation)
//
// Construit et jeté dans un seul appel d’évaluation.

use std::fmt;

use super::format::format_nombre;
use super::nombre::Nombre;

#[derive(Clone, Debug, PartialEq)]
pub enum Constante {
    Nombre(Nombre),
    Texte(String),
    Imaginaire(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Pos,
    Inversion, // ~
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    DivEntiere,
    Modulo,
    Puissance,

    // hors liste blanche
    MatMul,
    DecalageGauche,
    DecalageDroite,
    EtBit,
    OuBit,
}

impl OpUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpUnaire::Neg => "-",
            OpUnaire::Pos => "+",
            OpUnaire::Inversion => "~",
        }
    }
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::DivEntiere => "//",
            OpBinaire::Modulo => "%",
            OpBinaire::Puissance => "**",
            OpBinaire::MatMul => "@",
            OpBinaire::DecalageGauche => "<<",
            OpBinaire::DecalageDroite => ">>",
            OpBinaire::EtBit => "&",
            OpBinaire::OuBit => "|",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Litteral(Constante),
    Identifiant(String),
    Unaire(OpUnaire, Box<Noeud>),
    Binaire(OpBinaire, Box<Noeud>, Box<Noeud>),
    Appel(Box<Noeud>, Vec<Noeud>),
}

impl Noeud {
    pub fn nombre(n: impl Into<Nombre>) -> Noeud {
        Noeud::Litteral(Constante::Nombre(n.into()))
    }

    pub fn ident(nom: &str) -> Noeud {
        Noeud::Identifiant(nom.to_string())
    }

    pub fn unaire(op: OpUnaire, x: Noeud) -> Noeud {
        Noeud::Unaire(op, Box::new(x))
    }

    pub fn binaire(op: OpBinaire, a: Noeud, b: Noeud) -> Noeud {
        Noeud::Binaire(op, Box::new(a), Box::new(b))
    }

    /// Profondeur de l’arbre (feuille = 1).
    /// Itératif : doit fonctionner même sur un arbre que l’on s’apprête à refuser.
    pub fn profondeur(&self) -> usize {
        let mut pile: Vec<(&Noeud, usize)> = vec![(self, 1)];
        let mut max = 0;

        while let Some((n, d)) = pile.pop() {
            max = max.max(d);
            match n {
                Noeud::Litteral(_) | Noeud::Identifiant(_) => {}
                Noeud::Unaire(_, x) => pile.push((x.as_ref(), d + 1)),
                Noeud::Binaire(_, a, b) => {
                    pile.push((a.as_ref(), d + 1));
                    pile.push((b.as_ref(), d + 1));
                }
                Noeud::Appel(cible, args) => {
                    pile.push((cible.as_ref(), d + 1));
                    pile.extend(args.iter().map(|a| (a, d + 1)));
                }
            }
        }

        max
    }

    /// Forme postfixée (RPN) pour la démarche : `sin(1+2)` -> `1 2 + sin/1`.
    pub fn format_postfixe(&self) -> String {
        let mut out = Vec::new();
        self.postfixe(&mut out);
        out.join(" ")
    }

    fn postfixe(&self, out: &mut Vec<String>) {
        match self {
            Noeud::Litteral(c) => out.push(format_constante(c)),
            Noeud::Identifiant(nom) => out.push(nom.clone()),
            Noeud::Unaire(op, x) => {
                x.postfixe(out);
                // neg / pos distingués du binaire
                out.push(format!("{}u", op.symbole()));
            }
            Noeud::Binaire(op, a, b) => {
                a.postfixe(out);
                b.postfixe(out);
                out.push(op.symbole().to_string());
            }
            Noeud::Appel(cible, args) => {
                for a in args {
                    a.postfixe(out);
                }
                match cible.as_ref() {
                    Noeud::Identifiant(nom) => out.push(format!("{nom}/{}", args.len())),
                    autre => out.push(format!("({autre})/{}", args.len())),
                }
            }
        }
    }
}

fn format_constante(c: &Constante) -> String {
    match c {
        Constante::Nombre(n) => format_nombre(*n),
        Constante::Texte(s) => format!("'{s}'"),
        Constante::Imaginaire(x) => format!("{x}j"),
    }
}

/// Forme infixe entièrement parenthésée.
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Litteral(c) => f.write_str(&format_constante(c)),
            Noeud::Identifiant(nom) => f.write_str(nom),
            Noeud::Unaire(op, x) => write!(f, "({}{x})", op.symbole()),
            Noeud::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Noeud::Appel(cible, args) => {
                write!(f, "{cible}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
