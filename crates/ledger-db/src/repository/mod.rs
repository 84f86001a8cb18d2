//! # Repository Module
//!
//! Database repository implementations for the ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Auth Gate / Ledger operation                                          │
//! │       │                                                                 │
//! │       │  db.users().find_by_credentials("ana", "x1")                    │
//! │       ▼                                                                 │
//! │  UserRepository              SaleRepository                            │
//! │  ├── find_by_username        ├── insert                                │
//! │  ├── find_by_credentials     ├── insert_many (one transaction)         │
//! │  ├── insert                  ├── fetch_all (insertion order)           │
//! │  └── count_by_username       └── count                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both tables are append-only: there is no update or delete path.

pub mod sale;
pub mod user;
