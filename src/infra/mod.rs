pub mod sharepoint;
