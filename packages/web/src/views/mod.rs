mod login;
pub use login::Login;

mod signup;
pub use signup::SignUp;

mod leaves;
pub use leaves::Leaves;
