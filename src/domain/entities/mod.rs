pub mod vector_entry;
