mod hashing;
mod verification;
