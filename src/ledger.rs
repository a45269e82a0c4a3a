use std::collections::BTreeMap;
use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::calendar::format_date;
use crate::known_players::KnownPlayers;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LedgerError {
    NoSuchCollection { date: Date },
    UnknownPlayer { name: String },
    // Collection is closed. Payments are frozen until it is reopened.
    AlreadyCompleted { date: Date },
    NothingPaid { date: Date },
    NotCompleted { date: Date },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::NoSuchCollection { date } => {
                write!(f, "no collection started for {}", format_date(*date))
            }
            LedgerError::UnknownPlayer { name } => write!(f, "{name} is not a known player"),
            LedgerError::AlreadyCompleted { date } => {
                write!(f, "collection for {} is closed", format_date(*date))
            }
            LedgerError::NothingPaid { date } => {
                write!(f, "nobody has paid for {} yet", format_date(*date))
            }
            LedgerError::NotCompleted { date } => {
                write!(f, "collection for {} is still open", format_date(*date))
            }
        }
    }
}

impl std::error::Error for LedgerError {}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Payment {
    pub name: String,
    pub paid: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CollectionStatus {
    Open,
    Completed,
}

// Who paid the fee for one session.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Collection {
    pub date: Date,
    // One row per known player, in known-player order.
    pub payments: Vec<Payment>,
    pub is_completed: bool,
    // Snapshot taken when the collection was last closed.
    pub paid_players: Vec<String>,
}

impl Collection {
    fn new(date: Date, known: &KnownPlayers) -> Self {
        Collection {
            date,
            payments: known.iter().map(|name| Payment { name: name.to_owned(), paid: false }).collect(),
            is_completed: false,
            paid_players: Vec::new(),
        }
    }

    pub fn status(&self) -> CollectionStatus {
        if self.is_completed { CollectionStatus::Completed } else { CollectionStatus::Open }
    }
    pub fn is_paid(&self, name: &str) -> bool {
        self.payments.iter().any(|p| p.name == name && p.paid)
    }
    pub fn paid_names(&self) -> impl Iterator<Item = &str> {
        self.payments.iter().filter(|p| p.paid).map(|p| p.name.as_str())
    }
    pub fn total_paid(&self) -> usize { self.payments.iter().filter(|p| p.paid).count() }
    pub fn total_amount(&self, fee_per_player: u32) -> u32 {
        self.total_paid() as u32 * fee_per_player
    }
    pub fn can_close(&self) -> bool { !self.is_completed && self.total_paid() > 0 }
}


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    known: KnownPlayers,
    collections: BTreeMap<Date, Collection>,
}

impl Ledger {
    pub fn new(known: KnownPlayers) -> Self { Ledger { known, collections: BTreeMap::new() } }

    pub fn known_players(&self) -> &KnownPlayers { &self.known }
    pub fn collection(&self, date: Date) -> Option<&Collection> { self.collections.get(&date) }
    pub fn collections(&self) -> impl Iterator<Item = &Collection> { self.collections.values() }
    pub fn dates_with_data(&self) -> impl Iterator<Item = Date> + '_ {
        self.collections.keys().copied()
    }

    // Starts a collection with nobody paid. Does nothing if one already exists.
    pub fn open(&mut self, date: Date) -> &Collection {
        let known = &self.known;
        self.collections.entry(date).or_insert_with(|| {
            info!("Started collection for {}", format_date(date));
            Collection::new(date, known)
        })
    }

    pub fn toggle(&mut self, date: Date, name: &str) -> Result<bool, LedgerError> {
        let collection = self.open_collection_mut(date)?;
        let payment = collection
            .payments
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| LedgerError::UnknownPlayer { name: name.to_owned() })?;
        payment.paid = !payment.paid;
        Ok(payment.paid)
    }

    // Freezes the collection and returns the names of those who paid.
    pub fn close(&mut self, date: Date) -> Result<Vec<String>, LedgerError> {
        let collection = self.open_collection_mut(date)?;
        if collection.total_paid() == 0 {
            return Err(LedgerError::NothingPaid { date });
        }
        collection.paid_players = collection.paid_names().map(str::to_owned).collect();
        collection.is_completed = true;
        info!(
            "Closed collection for {}: {} paid",
            format_date(date),
            collection.paid_players.len()
        );
        Ok(collection.paid_players.clone())
    }

    pub fn reopen(&mut self, date: Date) -> Result<&Collection, LedgerError> {
        let collection =
            self.collections.get_mut(&date).ok_or(LedgerError::NoSuchCollection { date })?;
        if !collection.is_completed {
            return Err(LedgerError::NotCompleted { date });
        }
        collection.is_completed = false;
        info!("Reopened collection for {}", format_date(date));
        Ok(collection)
    }

    fn open_collection_mut(&mut self, date: Date) -> Result<&mut Collection, LedgerError> {
        let collection =
            self.collections.get_mut(&date).ok_or(LedgerError::NoSuchCollection { date })?;
        if collection.is_completed {
            return Err(LedgerError::AlreadyCompleted { date });
        }
        Ok(collection)
    }
}
