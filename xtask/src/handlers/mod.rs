pub mod toggles;
