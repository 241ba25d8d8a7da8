use vktor::{Status, VktorParser};

#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut parser = VktorParser::new(vktor::DEFAULT_MAX_DEPTH);
        parser.feed(data.to_vec());
        loop {
            match parser.parse() {
                Ok(Status::Token) => {}
                Ok(Status::NeedMore) | Ok(Status::Complete) | Err(_) => break,
            }
        }
    });
}
