fn main() {
    careportal_frontend::boot();
}
