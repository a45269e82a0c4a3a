use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::player::normalize_name;


// The regulars of the weekly game. They show up as roster suggestions and as the rows of
// every payment collection.
#[rustfmt::skip]
const PELADA_REGULARS: &[&str] = &[
    "Rubens", "Felipe Nobre", "Yuri Cocô", "Guimaraes", "Bruno", "Roceiro",
    "Foguete no Rabo", "Oliveira", "Paraíba", "Barra", "Pato", "Pedro Gordão",
    "Marcao", "Branco", "Renan", "Lucas Andrew", "Rodrigo China", "Yuri nobre",
    "Valtinho", "Everton Cetão", "Yuri Moura", "Vitor convidado", "Bruno Nogueira",
    "Juninho", "Lucas Almeida", "Marcos Paulo", "MTS", "Felipe Safanhoto",
    "Amigo marquinhos", "João",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KnownPlayers {
    names: Vec<String>,
}

impl KnownPlayers {
    pub fn new(names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let names = names
            .into_iter()
            .filter_map(|name| normalize_name(name.as_ref()))
            .unique()
            .collect();
        KnownPlayers { names }
    }

    pub fn pelada() -> Self { Self::new(PELADA_REGULARS) }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.names.iter().map(String::as_str) }
    pub fn contains(&self, name: &str) -> bool { self.names.iter().any(|n| n == name) }

    // Case-insensitive substring search, in list order.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a str> {
        let term = term.trim().to_lowercase();
        self.iter().filter(move |name| name.to_lowercase().contains(&term))
    }
}

impl Default for KnownPlayers {
    fn default() -> Self { Self::pelada() }
}

impl From<Vec<String>> for KnownPlayers {
    fn from(names: Vec<String>) -> Self { Self::new(names) }
}

impl From<KnownPlayers> for Vec<String> {
    fn from(known: KnownPlayers) -> Self { known.names }
}
