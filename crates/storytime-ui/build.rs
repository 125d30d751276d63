fn main() {
    slint_build::compile("ui/app.slint").expect("failed to compile slint UI");
}
