pub mod mongo;
pub mod server;

pub mod prelude {
    // Database names.
    pub const ADMIN_DB: &str = "admin";

    // Server error codes.
    pub const DUPLICATE_KEY:       i32 = 11000;
    pub const NOT_YET_INITIALIZED: i32 = 94;

    // Command names.
    pub const CREATE_USER:         &str = "createUser";
    pub const REPL_SET_GET_STATUS: &str = "replSetGetStatus";
    pub const REPL_SET_INITIATE:   &str = "replSetInitiate";
}
