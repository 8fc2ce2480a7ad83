//! Compile-pass fixture: derive on a generic struct.

use easy_config::{MapEnv, Populate};

#[derive(Populate)]
struct Wrapper<T>
where
    T: Default,
{
    #[config(cli = "limit", default = "10")]
    limit: u32,
    extra: T,
}

fn main() {
    let wrapper = Wrapper::<Vec<u8>>::populate_from(Vec::<String>::new(), &MapEnv::new());
    assert!(wrapper.is_ok());
}
