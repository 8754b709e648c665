pub mod ledger_kit;
