//! Session-backed stores for browse-to-booking state.
//!
//! The cart and the in-progress checkout are plain serializable structs
//! persisted in the tower-sessions session. All mutation goes through
//! their methods; route handlers load, mutate, save.

pub mod cart;
pub mod checkout;

pub use cart::{Cart, CartError, CartItem, load_cart, save_cart};
pub use checkout::{
    AttendeeEntry, AttendeeField, AttendeeFormError, AttendeeSlot, Checkout, CheckoutError,
    CheckoutStep, PaymentDetails, PaymentMethod, clear_checkout, load_checkout, save_checkout,
};
