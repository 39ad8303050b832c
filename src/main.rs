fn main() {
    if let Err(e) = cake_action::action_main() {
        cake_action::actions::set_failed(&snafu::Report::from_error(e).to_string());
        std::process::exit(1);
    }
}
