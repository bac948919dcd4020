mod catalog;
mod config;
mod dom;
mod guard;
mod notice;
mod page;
mod pdfjs;
mod storage;
mod viewer;

fn main() {
    console_error_panic_hook::set_once();
    page::start();
}
