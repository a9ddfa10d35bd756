//! Data-access module split across logical submodules. Everything here is
//! read-only: the store is externally provisioned and this application never
//! writes to it.

mod connection;
mod elements;
mod gateway;
mod ions;

pub use connection::{open_database, verify_schema};
pub use elements::{list_elements, normalized_symbol, resolve_element};
pub use gateway::{QueryError, QueryGateway, TextRow};
pub use ions::{list_ions, resolve_ion};

#[cfg(test)]
pub(crate) mod test_support {
    use rusqlite::Connection;

    /// In-memory store with the three relations the application consumes,
    /// seeded with a handful of rows including the deliberately dirty ones
    /// (null charges, non-numeric text) the resolvers must tolerate.
    pub(crate) fn seeded_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Elements (
                Symbol TEXT, Charge INTEGER, Name TEXT,
                AtomicWeight REAL, AtomicNumber INTEGER
             );
             CREATE TABLE Cations (
                Symbol TEXT, Charge TEXT, Name TEXT, AtomicWeight TEXT
             );
             CREATE TABLE Anions (
                Symbol TEXT, Charge TEXT, Name TEXT, AtomicWeight TEXT
             );

             INSERT INTO Elements VALUES ('H',  NULL, 'Hydrogen', 1.008, 1);
             INSERT INTO Elements VALUES ('NA', 1,    'Sodium',   22.99, 11);
             INSERT INTO Elements VALUES ('CL', -1,   'Chlorine', 35.45, 17);
             INSERT INTO Elements VALUES ('CA', 2,    'Calcium',  40.08, 20);

             INSERT INTO Cations VALUES ('NA', '1',   'Sodium',    '22.99');
             INSERT INTO Cations VALUES ('CA', '2',   'Calcium',   '40.08');
             INSERT INTO Cations VALUES ('K',  NULL,  'Potassium', NULL);
             INSERT INTO Cations VALUES ('MG', 'two', 'Magnesium', 'heavy');
             INSERT INTO Cations VALUES ('ZN', '0',   'Zinc',      '65.38');

             INSERT INTO Anions VALUES ('CL', '-1',  'Chloride', '35.45');
             INSERT INTO Anions VALUES ('O',  '-2',  'Oxide',    '16.00');
             INSERT INTO Anions VALUES ('BR', NULL,  'Bromide',  '79.90');",
        )
        .unwrap();
        conn
    }
}
