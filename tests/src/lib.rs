#[cfg(test)]
mod support;

#[cfg(test)]
mod sweep;
