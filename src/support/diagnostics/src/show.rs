pub trait Show {
    fn show(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result;

    fn eprintln(&self) {
        let mut message = String::new();
        if self.show(&mut message).is_ok() {
            eprintln!("{}", message);
        }
    }
}

