xflags::xflags! {
    /// Developer tasks for the workspace.
    cmd xtask {
        /// Run the test suite, with and without the parallel feature.
        cmd test {
            /// Only run the tests of this package.
            optional -p, --package package: String
        }
        /// Run the container tests under miri.
        cmd miri {}
        /// Format, apply compiler and clippy fixes, sort manifests.
        cmd fix {}
    }
}
