#![no_main]

use libfuzzer_sys::fuzz_target;
use pemdump::der::Tlv;
use pemdump::policy::Policy;

fuzz_target!(|data: &[u8]| {
    let (which, data) = match data.split_first() {
        Some((first, data)) => (*first, data),
        None => return,
    };

    match which % 3 {
        0 => { let _ = Tlv::read(data); },
        1 => { let _ = Policy::default().walk(data); },
        2 => { let _ = pemdump::dump(data); },
        _ => panic!("what?"),
    }
});
