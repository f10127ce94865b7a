//! Strukturelle Ladefehler beim Verbindungsaufbau und deren Sammlung.
//!
//! Fehler werden nie geworfen, sondern pro Verbindung als `Err` zurueckgegeben
//! und vom Aufrufer in einen `LoadReport` aggregiert. Der Weltaufbau laeuft
//! dabei immer vollstaendig durch.

use std::fmt;

/// Strukturfehler beim Aufbau einer Exit-zu-Exit-Verbindung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Quell- oder Zielraum fehlt in den Rohdaten
    MissingRoom {
        /// Name des Quellraums ("NONE" falls unbekannt)
        source: String,
        /// Name des Zielraums ("NONE" falls unbekannt)
        target: String,
    },
    /// Exit-Index ausserhalb des Exit-Arrays des Quellraums
    SourceExitOutOfRange {
        /// Name des Quellraums
        room: String,
        /// Angefragter Exit-Index
        exit: i32,
        /// Tatsaechliche Exit-Anzahl
        exit_count: usize,
    },
    /// Exit-Index ausserhalb des Exit-Arrays des Zielraums
    TargetExitOutOfRange {
        /// Name des Zielraums
        room: String,
        /// Angefragter Exit-Index
        exit: i32,
        /// Tatsaechliche Exit-Anzahl
        exit_count: usize,
    },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::MissingRoom { source, target } => write!(
                f,
                "Verbindung von {source} nach {target} konnte nicht aufgebaut werden: Raum fehlt"
            ),
            ConnectionError::SourceExitOutOfRange {
                room,
                exit,
                exit_count,
            } => write!(
                f,
                "Verbindung ueber nicht existierenden Exit {exit} in {room} (hat {exit_count} Exits)"
            ),
            ConnectionError::TargetExitOutOfRange {
                room,
                exit,
                exit_count,
            } => write!(
                f,
                "Verbindung ueber nicht existierenden Exit {exit} in {room} (hat {exit_count} Exits)"
            ),
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Sammelbericht aller Ladefehler eines Weltaufbaus.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    errors: Vec<ConnectionError>,
}

impl LoadReport {
    /// Erstellt einen leeren Bericht.
    pub fn new() -> Self {
        Self::default()
    }

    /// Haengt einen Fehler an.
    pub fn push(&mut self, error: ConnectionError) {
        self.errors.push(error);
    }

    /// Anzahl gesammelter Fehler.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `true` wenn keine Fehler aufgetreten sind.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iteriert ueber alle Fehler.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionError> {
        self.errors.iter()
    }

    /// Schreibt alle Fehler als Warnungen ins Log.
    pub fn log_all(&self) {
        for error in &self.errors {
            log::warn!("Ladefehler: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sammelt_fehler_in_reihenfolge() {
        let mut report = LoadReport::new();
        assert!(report.is_empty());

        report.push(ConnectionError::MissingRoom {
            source: "SU_C04".into(),
            target: "NONE".into(),
        });
        report.push(ConnectionError::SourceExitOutOfRange {
            room: "SU_C04".into(),
            exit: 5,
            exit_count: 3,
        });

        assert_eq!(report.len(), 2);
        let first = report.iter().next().expect("Fehler erwartet");
        assert!(matches!(first, ConnectionError::MissingRoom { .. }));
    }

    #[test]
    fn fehlertext_nennt_raum_und_exit() {
        let error = ConnectionError::SourceExitOutOfRange {
            room: "SU_C04".into(),
            exit: 5,
            exit_count: 3,
        };
        let text = error.to_string();
        assert!(text.contains("SU_C04"));
        assert!(text.contains('5'));
    }
}
