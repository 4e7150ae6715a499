pub mod shared {
    pub mod core {
        pub mod request_context;
    }
    pub mod infrastructure {
        pub mod media_store;
        pub mod query_armor;
    }
}

pub mod modules {
    pub mod payments {
        pub mod core {
            pub mod captured_payment;
            pub mod signature;
            pub mod webhook_event;
        }
        pub mod use_cases {
            pub mod capture_payment {
                pub mod handler;
                pub mod ledger_port;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_payment {
                pub mod queries_port;
                pub mod inbound {
                    pub mod graphql;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod payments_in_memory;
            }
        }
    }
    pub mod uploads {
        pub mod core {
            pub mod upload_profile;
        }
        pub mod use_cases {
            pub mod upload_image {
                pub mod handler;
                pub mod intake;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
