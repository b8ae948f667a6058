pub mod builder;
pub mod canvas;
pub mod dialogs;
pub mod layout;
pub mod toast;
